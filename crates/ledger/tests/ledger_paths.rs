//! Integration tests for ledger path validity.
//!
//! These tests verify that committed histories are always valid paths
//! through the order's track, including under interleaved appends.

use common::OrderId;
use domain::{ActorId, OrderStatus, Track, valid_path};
use ledger::{InMemoryLedger, LedgerError, LedgerStore};

async fn drive(ledger: &InMemoryLedger, order_id: OrderId, statuses: &[OrderStatus]) {
    let actor = ActorId::new();
    for status in statuses {
        ledger
            .append(order_id, *status, actor, None)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn committed_online_history_is_a_valid_path() {
    let ledger = InMemoryLedger::new();
    let order_id = OrderId::new();

    drive(
        &ledger,
        order_id,
        &[
            OrderStatus::WaitingDeposit,
            OrderStatus::PickupScheduled,
            OrderStatus::PickupProgress,
            OrderStatus::Inspection,
            OrderStatus::WaitingPayment,
            OrderStatus::InProcess,
            OrderStatus::ProcessCompleted,
            OrderStatus::Delivery,
            OrderStatus::Completed,
        ],
    )
    .await;

    let history = ledger.history(order_id).await.unwrap();
    let statuses: Vec<_> = history.iter().map(|e| e.status).collect();
    assert!(valid_path(Track::Online, &statuses));
    assert_eq!(statuses.len(), 9);
}

#[tokio::test]
async fn committed_offline_history_never_contains_pickup_states() {
    let ledger = InMemoryLedger::new();
    let order_id = OrderId::new();

    drive(
        &ledger,
        order_id,
        &[
            OrderStatus::Inspection,
            OrderStatus::WaitingPayment,
            OrderStatus::InProcess,
            OrderStatus::ProcessCompleted,
            OrderStatus::Delivery,
            OrderStatus::Completed,
        ],
    )
    .await;

    let history = ledger.history(order_id).await.unwrap();
    let statuses: Vec<_> = history.iter().map(|e| e.status).collect();
    assert!(valid_path(Track::Offline, &statuses));
    assert!(statuses.iter().all(|s| !s.is_pickup_leg()));
}

#[tokio::test]
async fn offline_ledger_refuses_pickup_states_outright() {
    let ledger = InMemoryLedger::new();
    let order_id = OrderId::new();
    let actor = ActorId::new();

    ledger
        .append(order_id, OrderStatus::Inspection, actor, None)
        .await
        .unwrap();

    for pickup_state in [OrderStatus::PickupScheduled, OrderStatus::PickupProgress] {
        let result = ledger.append(order_id, pickup_state, actor, None).await;
        assert!(
            matches!(result, Err(LedgerError::InvalidTransition { .. })),
            "offline ledger accepted {pickup_state}"
        );
    }
}

#[tokio::test]
async fn rejected_append_leaves_no_entry() {
    let ledger = InMemoryLedger::new();
    let order_id = OrderId::new();
    let actor = ActorId::new();

    ledger
        .append(order_id, OrderStatus::WaitingDeposit, actor, None)
        .await
        .unwrap();

    let before = ledger.history(order_id).await.unwrap().len();
    let result = ledger
        .append(order_id, OrderStatus::Delivery, actor, None)
        .await;
    assert!(result.is_err());
    assert_eq!(ledger.history(order_id).await.unwrap().len(), before);
}

#[tokio::test]
async fn interleaved_orders_keep_independent_paths() {
    let ledger = InMemoryLedger::new();
    let online = OrderId::new();
    let offline = OrderId::new();
    let actor = ActorId::new();

    ledger
        .append(online, OrderStatus::WaitingDeposit, actor, None)
        .await
        .unwrap();
    ledger
        .append(offline, OrderStatus::Inspection, actor, None)
        .await
        .unwrap();
    ledger
        .append(online, OrderStatus::PickupScheduled, actor, None)
        .await
        .unwrap();
    ledger
        .append(offline, OrderStatus::WaitingPayment, actor, None)
        .await
        .unwrap();

    assert_eq!(ledger.track(online).await.unwrap(), Track::Online);
    assert_eq!(ledger.track(offline).await.unwrap(), Track::Offline);
    assert_eq!(
        ledger.current_status(online).await.unwrap(),
        OrderStatus::PickupScheduled
    );
    assert_eq!(
        ledger.current_status(offline).await.unwrap(),
        OrderStatus::WaitingPayment
    );
}
