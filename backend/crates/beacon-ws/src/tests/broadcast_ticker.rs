use crate::tests::{MockConnection, as_dyn};
use crate::{
    BroadcastConfig, BroadcastTicker, Connection, ConnectionConfig, ConnectionRegistry,
    EchoSessionHandler, Metrics, SessionHandler,
};

use chrono::{Local, TimeZone};

const PREFIX: &str = "Message from server, current time: ";

fn ticker_with_limit(registry: &ConnectionRegistry, session_limit_ticks: u64) -> BroadcastTicker {
    let config = BroadcastConfig {
        session_limit_ticks,
        ..BroadcastConfig::default()
    };
    BroadcastTicker::new(registry.clone(), config, Metrics::new())
}

async fn run_ticks(ticker: &BroadcastTicker, count: u64) {
    for _ in 0..count {
        ticker.tick().await;
    }
}

#[test]
fn given_timestamp_when_message_composed_then_prefix_followed_by_time() {
    let ticker = ticker_with_limit(&ConnectionRegistry::new(), 100);
    let now = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 5).unwrap();

    let message = ticker.compose_message(now);

    assert!(message.starts_with(PREFIX));
    assert!(message.contains("2026-10-18 09:30:05.000"));
}

#[tokio::test]
async fn given_empty_registry_when_ticked_then_no_sends_and_counter_advances() {
    // Given
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 100);

    // When
    let report = ticker.tick().await;

    // Then
    assert_eq!(report.tick, 1);
    assert_eq!(report.recipients, 0);
    assert_eq!(report.sent(), 0);
    assert_eq!(ticker.counter().get(), 1);
}

#[tokio::test]
async fn given_connections_when_ticked_then_each_receives_timestamped_message() {
    // Given
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 100);
    let a = MockConnection::new("a");
    let b = MockConnection::new("b");
    registry.add(as_dyn(&a)).await;
    registry.add(as_dyn(&b)).await;

    // When
    let report = ticker.tick().await;

    // Then
    assert_eq!(report.recipients, 2);
    assert_eq!(report.sent(), 2);
    for connection in [&a, &b] {
        let sent = connection.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with(PREFIX));
    }
}

#[tokio::test]
async fn given_ticks_up_to_limit_when_ticked_then_nothing_closed() {
    // Given
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 100);
    let a = MockConnection::new("a");
    registry.add(as_dyn(&a)).await;

    // When
    run_ticks(&ticker, 100).await;

    // Then
    assert_eq!(ticker.counter().get(), 100);
    assert_eq!(a.close_calls(), 0);
    assert_eq!(a.sent().len(), 100);
    assert!(registry.contains(a.id()).await);
}

#[tokio::test]
async fn given_tick_101_when_ticked_then_every_connection_messaged_and_closed() {
    // Given
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 100);
    let a = MockConnection::new("a");
    let b = MockConnection::new("b");
    let c = MockConnection::new("c");
    for connection in [&a, &b, &c] {
        registry.add(as_dyn(connection)).await;
    }
    run_ticks(&ticker, 100).await;

    // When
    let report = ticker.tick().await;

    // Then
    assert_eq!(report.tick, 101);
    assert_eq!(report.closed, 3);
    for connection in [&a, &b, &c] {
        assert_eq!(connection.close_calls(), 1);
        assert_eq!(connection.sent().len(), 101);
        assert!(!registry.contains(connection.id()).await);
    }
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn given_counter_past_limit_when_new_connection_opened_then_closed_on_next_tick() {
    // Given: global counter already beyond the limit
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 100);
    run_ticks(&ticker, 101).await;

    // When: a fresh connection arrives
    let d = MockConnection::new("d");
    registry.add(as_dyn(&d)).await;
    let report = ticker.tick().await;

    // Then: cutoff is global, not per-connection age
    assert_eq!(report.tick, 102);
    assert_eq!(d.sent().len(), 1);
    assert_eq!(d.close_calls(), 1);
    assert!(!registry.contains(d.id()).await);
}

#[tokio::test]
async fn given_late_joiner_before_limit_when_limit_passed_then_closed_with_early_joiner() {
    // Given
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 100);
    let early = MockConnection::new("early");
    registry.add(as_dyn(&early)).await;
    run_ticks(&ticker, 99).await;
    let late = MockConnection::new("late");
    registry.add(as_dyn(&late)).await;

    // When
    run_ticks(&ticker, 2).await;

    // Then
    assert_eq!(early.close_calls(), 1);
    assert_eq!(late.close_calls(), 1);
    assert_eq!(late.sent().len(), 2);
}

#[tokio::test]
async fn given_failing_connection_when_ticked_then_others_still_receive() {
    // Given
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 100);
    let broken = MockConnection::failing_sends("broken");
    let a = MockConnection::new("a");
    let b = MockConnection::new("b");
    for connection in [&broken, &a, &b] {
        registry.add(as_dyn(connection)).await;
    }

    // When
    let report = ticker.tick().await;
    let next = ticker.tick().await;

    // Then
    assert_eq!(report.send_failures, 1);
    assert_eq!(report.sent(), 2);
    assert_eq!(next.tick, 2);
    assert_eq!(a.sent().len(), 2);
    assert_eq!(b.sent().len(), 2);
    assert!(registry.contains(broken.id()).await);
}

#[tokio::test]
async fn given_failing_close_when_limit_passed_then_rest_closed_and_all_removed() {
    // Given
    let registry = ConnectionRegistry::new();
    let ticker = ticker_with_limit(&registry, 1);
    let stubborn = MockConnection::failing_close("stubborn");
    let a = MockConnection::new("a");
    registry.add(as_dyn(&stubborn)).await;
    registry.add(as_dyn(&a)).await;
    ticker.tick().await;

    // When
    let report = ticker.tick().await;

    // Then
    assert_eq!(report.close_failures, 1);
    assert_eq!(report.closed, 2);
    assert_eq!(a.close_calls(), 1);
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn given_open_message_and_ticks_when_run_end_to_end_then_reply_isolated_and_all_evicted() {
    // Given
    let registry = ConnectionRegistry::new();
    let handler =
        EchoSessionHandler::new(registry.clone(), ConnectionConfig::default(), Metrics::new());
    let ticker = ticker_with_limit(&registry, 100);
    let a = MockConnection::new("a");
    let b = MockConnection::new("b");
    let c = MockConnection::new("c");
    for connection in [&a, &b, &c] {
        handler.on_open(as_dyn(connection), "room").await;
    }

    // When: "ping" on A
    handler.on_message("ping", a.as_ref(), "room").await;

    // Then: only A got the reply
    assert_eq!(a.sent(), vec!["Hello.".to_string()]);
    assert!(b.sent().is_empty());
    assert!(c.sent().is_empty());

    // When: 101 ticks elapse
    run_ticks(&ticker, 101).await;

    // Then: A, B, C are closed and gone
    for connection in [&a, &b, &c] {
        assert_eq!(connection.close_calls(), 1);
        assert!(!registry.contains(connection.id()).await);
    }

    // When: D opens after the cutoff
    let d = MockConnection::new("d");
    handler.on_open(as_dyn(&d), "room").await;
    ticker.tick().await;

    // Then: D is closed on the very next tick
    assert_eq!(d.close_calls(), 1);
    assert!(registry.is_empty().await);

    // Close callbacks arriving afterwards are harmless
    handler.on_close(a.as_ref()).await;
    handler.on_close(d.as_ref()).await;
    assert!(registry.is_empty().await);
}
