//! Lifecycle orchestrator: the single entry point for lifecycle events.
//!
//! Every event — claim, stage completion, cancellation, payment settlement —
//! enters here. The orchestrator checks the acting role, the current ledger
//! status, and claim ownership; runs the stage processor; persists the
//! effects; appends the new status; and releases the claim, in that order,
//! so a refused step leaves no partial state. It is the only component that
//! appends to the status ledger.

use chrono::NaiveDate;
use claims::{Claim, ClaimError, ClaimStore};
use common::OrderId;
use domain::{
    Actor, ActorId, AddressId, CustomerId, Money, Order, OrderStatus, Role, Stage, Transaction,
    TransactionKind, TransactionStatus,
};
use ledger::{LedgerStore, StatusEntry};

use crate::config::Config;
use crate::error::{LifecycleError, Result};
use crate::gate::{GatewayCallback, PaymentGate, Settlement};
use crate::repo::{EvidenceRepository, OrderRepository, TransactionRepository};
use crate::stages::{
    DeliveryCompletion, DeliveryProcessor, InspectionProcessor, InspectionReport, PickupAbandon,
    PickupCompletion, PickupProcessor, StageOutcome, StageProcessor,
};

/// Orchestrates the order lifecycle over the ledger, claim store, and
/// repository seams.
pub struct LifecycleOrchestrator<L, C, O, T, E>
where
    L: LedgerStore,
    C: ClaimStore,
    O: OrderRepository,
    T: TransactionRepository,
    E: EvidenceRepository,
{
    ledger: L,
    claims: C,
    orders: O,
    transactions: T,
    evidence: E,
    gate: PaymentGate,
    config: Config,
    pickup: PickupProcessor,
    inspection: InspectionProcessor,
    delivery: DeliveryProcessor,
}

impl<L, C, O, T, E> LifecycleOrchestrator<L, C, O, T, E>
where
    L: LedgerStore,
    C: ClaimStore,
    O: OrderRepository,
    T: TransactionRepository,
    E: EvidenceRepository,
{
    /// Creates a new orchestrator over the given stores.
    pub fn new(ledger: L, claims: C, orders: O, transactions: T, evidence: E, config: Config) -> Self {
        Self {
            ledger,
            claims,
            orders,
            transactions,
            evidence,
            gate: PaymentGate::new(),
            config,
            pickup: PickupProcessor,
            inspection: InspectionProcessor,
            delivery: DeliveryProcessor,
        }
    }

    /// The identity the payment gate writes ledger entries under.
    pub fn gateway_actor(&self) -> ActorId {
        self.gate.actor_id()
    }

    // ------------------------------------------------------------------
    // Order creation
    // ------------------------------------------------------------------

    /// Creates an online (pickup/delivery) order for a customer.
    ///
    /// Opens the ledger at `waiting_deposit` and creates the pending deposit
    /// transaction that gates pickup scheduling.
    #[tracing::instrument(skip(self, actor))]
    pub async fn create_online_order(
        &self,
        actor: Actor,
        customer_id: CustomerId,
        address_id: AddressId,
        scheduled_date: NaiveDate,
    ) -> Result<(Order, Transaction)> {
        if !(actor.is_customer(customer_id) || actor.role == Role::Admin) {
            return Err(LifecycleError::Unauthorized {
                action: "create an online order for this customer",
                role: actor.role,
            });
        }

        let number = self.orders.next_order_number().await?;
        let order = Order::online(OrderId::new(), number, customer_id, address_id, scheduled_date);
        self.orders.insert(order.clone()).await?;

        let deposit =
            Transaction::pending(order.id, TransactionKind::Deposit, self.config.deposit);
        self.transactions.insert(deposit.clone()).await?;

        self.ledger
            .append(order.id, OrderStatus::WaitingDeposit, actor.id, None)
            .await?;

        metrics::counter!("orders_created").increment(1);
        tracing::info!(order_id = %order.id, number = %order.number, "online order created");

        Ok((order, deposit))
    }

    /// Creates an offline (walk-in) order at the counter.
    ///
    /// The shoes are already in-store, so the ledger opens at `inspection`.
    #[tracing::instrument(skip(self, actor))]
    pub async fn create_offline_order(
        &self,
        actor: Actor,
        customer_id: CustomerId,
        scheduled_date: NaiveDate,
    ) -> Result<Order> {
        self.require_operational(actor, "create an offline order")?;

        let number = self.orders.next_order_number().await?;
        let order = Order::offline(OrderId::new(), number, customer_id, scheduled_date);
        self.orders.insert(order.clone()).await?;

        self.ledger
            .append(order.id, OrderStatus::Inspection, actor.id, None)
            .await?;

        metrics::counter!("orders_created").increment(1);
        tracing::info!(order_id = %order.id, number = %order.number, "offline order created");

        Ok(order)
    }

    // ------------------------------------------------------------------
    // Claims
    // ------------------------------------------------------------------

    /// Claims a stage's task for the acting staff member.
    ///
    /// The task must be open: the order's current status must be the stage's
    /// claimable status. Claiming a pickup additionally advances the order
    /// to `pickup_progress`; if that append is refused the claim is released
    /// again before the error propagates, so a failed event leaves nothing
    /// behind.
    #[tracing::instrument(skip(self, actor))]
    pub async fn claim_stage(&self, actor: Actor, order_id: OrderId, stage: Stage) -> Result<Claim> {
        self.require_operational(actor, "claim a stage")?;
        self.get_order(order_id).await?;

        let current = self.ledger.current_status(order_id).await?;
        if current != stage.claimable_at() {
            return Err(LifecycleError::StageNotClaimable {
                order_id,
                stage,
                status: current,
            });
        }

        let claim = self.claims.acquire(order_id, stage, actor.staff_id()).await?;
        self.orders.assign_staff(order_id, actor.staff_id()).await?;

        if stage == Stage::Pickup {
            let appended = self
                .ledger
                .append(order_id, OrderStatus::PickupProgress, actor.id, None)
                .await;
            if let Err(e) = appended {
                self.claims.release(claim.id).await;
                return Err(e.into());
            }
        }

        metrics::counter!("stages_claimed").increment(1);
        tracing::info!(%order_id, stage = %stage, staff = %claim.holder, "stage claimed");

        Ok(claim)
    }

    // ------------------------------------------------------------------
    // Pickup
    // ------------------------------------------------------------------

    /// Completes a held pickup: records the photos and moves the order to
    /// `inspection`.
    #[tracing::instrument(skip(self, actor, input))]
    pub async fn complete_pickup(
        &self,
        actor: Actor,
        order_id: OrderId,
        input: PickupCompletion,
    ) -> Result<StatusEntry> {
        self.require_operational(actor, "complete a pickup")?;
        let order = self.get_order(order_id).await?;
        let claim = self.held_claim(order_id, Stage::Pickup, actor).await?;

        self.pickup.validate(&input)?;
        let outcome = self.pickup.apply(&order, &actor, input);
        let entry = self.commit_outcome(order_id, actor, outcome).await?;

        self.claims.release(claim.id).await;
        tracing::info!(%order_id, "pickup completed");
        Ok(entry)
    }

    /// Abandons a held pickup.
    ///
    /// Recoverable: the order returns to `pickup_scheduled` and the task
    /// re-opens for any staff member. Non-recoverable: the order is
    /// cancelled outright.
    #[tracing::instrument(skip(self, actor, input))]
    pub async fn abandon_pickup(
        &self,
        actor: Actor,
        order_id: OrderId,
        input: PickupAbandon,
    ) -> Result<StatusEntry> {
        self.require_operational(actor, "abandon a pickup")?;
        self.get_order(order_id).await?;
        let claim = self.held_claim(order_id, Stage::Pickup, actor).await?;

        let target = if input.non_recoverable {
            OrderStatus::Cancelled
        } else {
            OrderStatus::PickupScheduled
        };
        let entry = self
            .ledger
            .append(order_id, target, actor.id, input.note)
            .await?;
        self.claims.release(claim.id).await;

        if input.non_recoverable {
            self.finalize_cancellation(order_id).await?;
        }

        tracing::info!(%order_id, recoverable = !input.non_recoverable, "pickup abandoned");
        Ok(entry)
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Completes a held inspection: persists the shoe records and photos,
    /// prices the services, opens the full-payment transaction, and moves
    /// the order to `waiting_payment`.
    ///
    /// A validation failure (mismatched shoe count, missing photos) changes
    /// nothing — the status stays, the claim stays held.
    #[tracing::instrument(skip(self, actor, input))]
    pub async fn complete_inspection(
        &self,
        actor: Actor,
        order_id: OrderId,
        input: InspectionReport,
    ) -> Result<(StatusEntry, Transaction)> {
        self.require_operational(actor, "complete an inspection")?;
        let order = self.get_order(order_id).await?;
        let claim = self.held_claim(order_id, Stage::Inspection, actor).await?;

        self.inspection.validate(&input)?;
        let outcome = self.inspection.apply(&order, &actor, input);

        // Open the full payment over the priced total before the status
        // moves; an order must never sit in waiting_payment without its
        // transaction.
        let total: Money = outcome.shoes.iter().map(|s| s.line_price).sum();
        let transaction = Transaction::pending(order_id, TransactionKind::FullPayment, total);
        self.transactions.insert(transaction.clone()).await?;

        let entry = self.commit_outcome(order_id, actor, outcome).await?;
        self.claims.release(claim.id).await;

        tracing::info!(%order_id, amount = %transaction.amount, "inspection completed");
        Ok((entry, transaction))
    }

    /// Releases a held inspection claim without completing it. The order
    /// stays in `inspection`, eligible for re-claim.
    #[tracing::instrument(skip(self, actor))]
    pub async fn abandon_inspection(&self, actor: Actor, order_id: OrderId) -> Result<()> {
        self.require_operational(actor, "abandon an inspection")?;
        self.get_order(order_id).await?;
        let claim = self.held_claim(order_id, Stage::Inspection, actor).await?;
        self.claims.release(claim.id).await;
        tracing::info!(%order_id, "inspection abandoned");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Processing and delivery hand-off
    // ------------------------------------------------------------------

    /// Marks the cleaning process finished: `in_process → process_completed`.
    #[tracing::instrument(skip(self, actor))]
    pub async fn mark_process_completed(
        &self,
        actor: Actor,
        order_id: OrderId,
    ) -> Result<StatusEntry> {
        self.require_operational(actor, "mark processing completed")?;
        self.get_order(order_id).await?;
        let entry = self
            .ledger
            .append(order_id, OrderStatus::ProcessCompleted, actor.id, None)
            .await?;
        Ok(entry)
    }

    /// Hands the order to the delivery queue: `process_completed → delivery`.
    /// The delivery task becomes claimable.
    #[tracing::instrument(skip(self, actor))]
    pub async fn start_delivery(&self, actor: Actor, order_id: OrderId) -> Result<StatusEntry> {
        self.require_operational(actor, "start delivery")?;
        self.get_order(order_id).await?;
        let entry = self
            .ledger
            .append(order_id, OrderStatus::Delivery, actor.id, None)
            .await?;
        Ok(entry)
    }

    /// Completes a held delivery: records the photos and moves the order to
    /// its terminal `completed` status.
    #[tracing::instrument(skip(self, actor, input))]
    pub async fn complete_delivery(
        &self,
        actor: Actor,
        order_id: OrderId,
        input: DeliveryCompletion,
    ) -> Result<StatusEntry> {
        self.require_operational(actor, "complete a delivery")?;
        let order = self.get_order(order_id).await?;
        let claim = self.held_claim(order_id, Stage::Delivery, actor).await?;

        self.delivery.validate(&input)?;
        let outcome = self.delivery.apply(&order, &actor, input);
        let entry = self.commit_outcome(order_id, actor, outcome).await?;

        self.claims.release(claim.id).await;
        tracing::info!(%order_id, "delivery completed");
        Ok(entry)
    }

    /// Releases a held delivery claim. The order stays in `delivery`
    /// awaiting re-claim; earlier stages never re-open.
    #[tracing::instrument(skip(self, actor))]
    pub async fn abandon_delivery(&self, actor: Actor, order_id: OrderId) -> Result<()> {
        self.require_operational(actor, "abandon a delivery")?;
        self.get_order(order_id).await?;
        let claim = self.held_claim(order_id, Stage::Delivery, actor).await?;
        self.claims.release(claim.id).await;
        tracing::info!(%order_id, "delivery abandoned");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cancellation
    // ------------------------------------------------------------------

    /// Cancels a non-terminal order.
    ///
    /// Staff and admin may cancel at any non-terminal status. A customer may
    /// cancel only their own order, and only while it is in
    /// `waiting_deposit` or `pickup_scheduled` — once staff hold work the
    /// counter decides. Cancellation releases every active claim for the
    /// order and marks still-pending transactions cancelled; the rows stay
    /// for audit.
    #[tracing::instrument(skip(self, actor))]
    pub async fn cancel_order(
        &self,
        actor: Actor,
        order_id: OrderId,
        note: Option<String>,
    ) -> Result<StatusEntry> {
        let order = self.get_order(order_id).await?;
        let current = self.ledger.current_status(order_id).await?;

        let allowed = if actor.role.is_operational() {
            true
        } else {
            actor.is_customer(order.customer_id)
                && matches!(
                    current,
                    OrderStatus::WaitingDeposit | OrderStatus::PickupScheduled
                )
        };
        if !allowed {
            return Err(LifecycleError::Unauthorized {
                action: "cancel this order",
                role: actor.role,
            });
        }

        let entry = self
            .ledger
            .append(order_id, OrderStatus::Cancelled, actor.id, note)
            .await?;
        self.finalize_cancellation(order_id).await?;

        metrics::counter!("orders_cancelled").increment(1);
        tracing::warn!(%order_id, role = %actor.role, "order cancelled");
        Ok(entry)
    }

    // ------------------------------------------------------------------
    // Payment callbacks
    // ------------------------------------------------------------------

    /// Handles a payment gateway callback.
    ///
    /// Translates the gateway vocabulary, updates the transaction, and on a
    /// settlement advances the order (`waiting_deposit → pickup_scheduled`
    /// for deposits, `waiting_payment → in_process` for full payments).
    /// Safe under at-least-once delivery: a replayed settlement finds the
    /// order already advanced and changes nothing. Partial payments never
    /// advance the lifecycle.
    #[tracing::instrument(skip(self))]
    pub async fn handle_payment_callback(&self, callback: GatewayCallback) -> Result<Transaction> {
        let mut transaction = self
            .transactions
            .get(callback.transaction_id)
            .await?
            .ok_or(LifecycleError::TransactionNotFound(callback.transaction_id))?;

        let settlement = self.gate.apply_callback(&mut transaction, &callback)?;
        self.transactions.update(transaction.clone()).await?;

        if let Some(settlement) = settlement {
            self.advance_on_settlement(transaction.order_id, settlement)
                .await?;
        }

        Ok(transaction)
    }

    /// Advances the order for a settlement, idempotently.
    ///
    /// The check runs against the ledger's current status, not transaction
    /// state, so replayed callbacks can never double-advance.
    async fn advance_on_settlement(
        &self,
        order_id: OrderId,
        settlement: Settlement,
    ) -> Result<()> {
        let (gate_status, next) = match settlement {
            Settlement::Deposit => (OrderStatus::WaitingDeposit, OrderStatus::PickupScheduled),
            Settlement::FullPayment => (OrderStatus::WaitingPayment, OrderStatus::InProcess),
        };

        let current = self.ledger.current_status(order_id).await?;
        if current != gate_status {
            metrics::counter!("settlement_replays_skipped").increment(1);
            tracing::debug!(%order_id, status = %current, "settlement replay ignored");
            return Ok(());
        }

        self.ledger
            .append(order_id, next, self.gate.actor_id(), None)
            .await?;

        metrics::counter!("payments_settled").increment(1);
        tracing::info!(%order_id, status = %next, "settlement advanced order");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    /// Looks up an order row.
    pub async fn order(&self, order_id: OrderId) -> Result<Order> {
        self.get_order(order_id).await
    }

    /// Reads an order's current status from the ledger.
    pub async fn current_status(&self, order_id: OrderId) -> Result<OrderStatus> {
        Ok(self.ledger.current_status(order_id).await?)
    }

    /// Returns an order's full status history.
    pub async fn history(&self, order_id: OrderId) -> Result<Vec<StatusEntry>> {
        Ok(self.ledger.history(order_id).await?)
    }

    /// Returns an order's transactions, oldest first.
    pub async fn transactions_for(&self, order_id: OrderId) -> Result<Vec<Transaction>> {
        Ok(self.transactions.for_order(order_id).await?)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require_operational(&self, actor: Actor, action: &'static str) -> Result<()> {
        if actor.role.is_operational() {
            Ok(())
        } else {
            Err(LifecycleError::Unauthorized {
                action,
                role: actor.role,
            })
        }
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        self.orders
            .get(order_id)
            .await?
            .ok_or(LifecycleError::OrderNotFound(order_id))
    }

    /// Returns the actor's active claim for the stage.
    ///
    /// A missing claim is `NotClaimed`; a claim held by someone else is an
    /// authorization failure.
    async fn held_claim(&self, order_id: OrderId, stage: Stage, actor: Actor) -> Result<Claim> {
        let claim = self
            .claims
            .active(order_id, stage)
            .await
            .ok_or(ClaimError::NotClaimed { order_id, stage })?;
        if claim.holder != actor.staff_id() {
            return Err(LifecycleError::Unauthorized {
                action: "complete a stage claimed by another staff member",
                role: actor.role,
            });
        }
        Ok(claim)
    }

    /// Persists a stage outcome and appends its status entry.
    ///
    /// Effects go in before the append; the append is the commit point that
    /// makes them visible lifecycle-wise.
    async fn commit_outcome(
        &self,
        order_id: OrderId,
        actor: Actor,
        outcome: StageOutcome,
    ) -> Result<StatusEntry> {
        if !outcome.shoes.is_empty() {
            self.evidence.add_shoes(outcome.shoes).await?;
        }
        if !outcome.photos.is_empty() {
            self.evidence.add_photos(outcome.photos).await?;
        }

        let entry = self
            .ledger
            .append(order_id, outcome.next_status, actor.id, outcome.note)
            .await?;

        metrics::counter!("lifecycle_transitions").increment(1);
        Ok(entry)
    }

    /// Post-cancellation cleanup: releases all claims and closes open
    /// transactions. Idempotent, like the release paths it is built on.
    async fn finalize_cancellation(&self, order_id: OrderId) -> Result<()> {
        self.claims.release_for_order(order_id).await;

        for mut transaction in self.transactions.for_order(order_id).await? {
            if transaction.status.is_open() {
                transaction.status = TransactionStatus::Cancelled;
                transaction.updated_at = chrono::Utc::now();
                self.transactions.update(transaction).await?;
            }
        }
        Ok(())
    }
}
