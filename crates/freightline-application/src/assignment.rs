//! Shipment assignment workflow.
//!
//! Drives a transporter-then-vehicle selection through explicit stages
//! to a shipment submission. Submission is two dependent remote writes:
//! create the shipment, then transition the source order to `Shipped`.
//! The two are not atomic; when the second write fails the workflow
//! reports a partial outcome rather than an error, because the shipment
//! already exists and must not be recreated.

use freightline_core::error::{FreightlineError, Result};
use freightline_core::order::model::OrderStatus;
use freightline_core::rehydration::RehydrationGate;
use freightline_core::shipment::gateway::ShipmentGateway;
use freightline_core::shipment::model::{Shipment, ShipmentRequest};
use freightline_core::transporter::gateway::TransporterGateway;
use freightline_core::transporter::model::{Transporter, Vehicle};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::orders::OrderService;

/// Where one assignment attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentStage {
    /// Nothing loaded or selected yet.
    #[default]
    Idle,
    /// Transporters fetched; none selected.
    TransporterListLoaded,
    /// A transporter with no vehicles is selected.
    TransporterSelected,
    /// A transporter with vehicles is selected; none picked yet.
    VehicleListAvailable,
    /// Both transporter and vehicle are selected; ready to submit.
    VehicleSelected,
    /// A submission is in flight.
    Submitting,
    /// The shipment exists (the order transition may still have failed,
    /// see [`AssignmentOutcome`]).
    Completed,
    /// Shipment creation itself failed; selections are preserved for a
    /// retry.
    Failed,
}

/// The result of a submission whose shipment was created.
#[derive(Debug, Clone)]
pub enum AssignmentOutcome {
    /// Shipment created and the order moved to `Shipped`.
    Completed { shipment: Shipment },
    /// Shipment created but the order status write failed. The shipment
    /// must not be recreated; only the status transition is retried.
    Partial {
        shipment: Shipment,
        status_error: FreightlineError,
    },
}

impl AssignmentOutcome {
    pub fn is_partial(&self) -> bool {
        matches!(self, AssignmentOutcome::Partial { .. })
    }

    pub fn shipment(&self) -> &Shipment {
        match self {
            AssignmentOutcome::Completed { shipment } => shipment,
            AssignmentOutcome::Partial { shipment, .. } => shipment,
        }
    }
}

#[derive(Default)]
struct AssignmentState {
    stage: AssignmentStage,
    transporters: Vec<Transporter>,
    selected_transporter: Option<Transporter>,
    selected_vehicle: Option<Vehicle>,
    /// Set once the shipment has been created, so a retry after a
    /// partial outcome never submits a second shipment.
    created_shipment: Option<Shipment>,
}

/// One assignment attempt for one order.
///
/// Instances are cheap and single-purpose; create a fresh workflow per
/// order being assigned.
pub struct AssignmentWorkflow {
    order_id: i64,
    transporters_gateway: Arc<dyn TransporterGateway>,
    shipments_gateway: Arc<dyn ShipmentGateway>,
    orders: Arc<OrderService>,
    gate: RehydrationGate,
    state: RwLock<AssignmentState>,
}

impl AssignmentWorkflow {
    pub fn new(
        order_id: i64,
        transporters_gateway: Arc<dyn TransporterGateway>,
        shipments_gateway: Arc<dyn ShipmentGateway>,
        orders: Arc<OrderService>,
        gate: RehydrationGate,
    ) -> Self {
        Self {
            order_id,
            transporters_gateway,
            shipments_gateway,
            orders,
            gate,
            state: RwLock::new(AssignmentState::default()),
        }
    }

    pub async fn stage(&self) -> AssignmentStage {
        self.state.read().await.stage
    }

    /// Fetches the transporter list (vehicles embedded) and resets any
    /// prior selections.
    pub async fn load_transporters(&self) -> Result<Vec<Transporter>> {
        self.gate.ready().await;
        let transporters = self.transporters_gateway.fetch_with_vehicles().await?;
        let mut state = self.state.write().await;
        state.transporters = transporters.clone();
        state.selected_transporter = None;
        state.selected_vehicle = None;
        state.stage = AssignmentStage::TransporterListLoaded;
        tracing::debug!(count = transporters.len(), "transporter list loaded");
        Ok(transporters)
    }

    /// Selects a transporter from the loaded list.
    ///
    /// The stage advances to `VehicleListAvailable` when the transporter
    /// has vehicles, or `TransporterSelected` when it has none. Any
    /// previously picked vehicle is cleared.
    pub async fn select_transporter(&self, transporter_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let transporter = state
            .transporters
            .iter()
            .find(|t| t.id == transporter_id)
            .cloned()
            .ok_or_else(|| {
                FreightlineError::not_found("transporter", transporter_id.to_string())
            })?;
        state.stage = if transporter.vehicles.is_empty() {
            AssignmentStage::TransporterSelected
        } else {
            AssignmentStage::VehicleListAvailable
        };
        state.selected_transporter = Some(transporter);
        state.selected_vehicle = None;
        Ok(())
    }

    /// The vehicles of the currently selected transporter.
    pub async fn vehicles(&self) -> Vec<Vehicle> {
        self.state
            .read()
            .await
            .selected_transporter
            .as_ref()
            .map(|t| t.vehicles.clone())
            .unwrap_or_default()
    }

    /// Picks one of the selected transporter's own vehicles.
    pub async fn select_vehicle(&self, vehicle_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let transporter = state
            .selected_transporter
            .as_ref()
            .ok_or(FreightlineError::IncompleteAssignment {
                missing: "transporter",
            })?;
        let vehicle = transporter
            .vehicle(vehicle_id)
            .cloned()
            .ok_or_else(|| FreightlineError::not_found("vehicle", vehicle_id.to_string()))?;
        state.selected_vehicle = Some(vehicle);
        state.stage = AssignmentStage::VehicleSelected;
        Ok(())
    }

    /// Submits the assignment: creates the shipment, then transitions
    /// the order to `Shipped`.
    ///
    /// Validation failures surface before any network traffic. A
    /// shipment-creation failure moves the workflow to `Failed` with
    /// selections preserved; calling `submit` again retries cleanly.
    /// Once a shipment exists, a failed order transition yields
    /// [`AssignmentOutcome::Partial`] and only
    /// [`AssignmentWorkflow::retry_status_transition`] may be retried.
    pub async fn submit(&self) -> Result<AssignmentOutcome> {
        self.gate.ready().await;
        let request = {
            let mut state = self.state.write().await;
            if state.stage == AssignmentStage::Submitting {
                return Err(FreightlineError::internal(
                    "assignment submission already in flight",
                ));
            }
            if state.created_shipment.is_some() {
                return Err(FreightlineError::internal(
                    "shipment already created for this assignment",
                ));
            }
            let transporter = state.selected_transporter.as_ref().ok_or(
                FreightlineError::IncompleteAssignment {
                    missing: "transporter",
                },
            )?;
            let vehicle =
                state
                    .selected_vehicle
                    .as_ref()
                    .ok_or(FreightlineError::IncompleteAssignment {
                        missing: "vehicle",
                    })?;
            let request = ShipmentRequest {
                order_id: self.order_id,
                vehicle_id: vehicle.id,
                user_id: transporter.user_id,
            };
            state.stage = AssignmentStage::Submitting;
            request
        };

        let shipment = match self.shipments_gateway.create_shipment(&request).await {
            Ok(shipment) => shipment,
            Err(e) => {
                // Selections stay in place so the user can retry.
                let mut state = self.state.write().await;
                state.stage = AssignmentStage::Failed;
                tracing::warn!(order_id = self.order_id, error = %e, "shipment creation failed");
                return Err(FreightlineError::AssignmentSubmitFailed(e.to_string()));
            }
        };

        {
            let mut state = self.state.write().await;
            state.created_shipment = Some(shipment.clone());
            state.stage = AssignmentStage::Completed;
        }
        tracing::info!(
            order_id = self.order_id,
            shipment_id = shipment.id,
            "shipment created"
        );

        match self.orders.set_status(self.order_id, OrderStatus::Shipped).await {
            Ok(_) => Ok(AssignmentOutcome::Completed { shipment }),
            Err(status_error) => {
                tracing::warn!(
                    order_id = self.order_id,
                    error = %status_error,
                    "shipment exists but the order transition failed"
                );
                Ok(AssignmentOutcome::Partial {
                    shipment,
                    status_error,
                })
            }
        }
    }

    /// Retries the order-to-`Shipped` transition after a partial
    /// outcome. Never creates another shipment.
    pub async fn retry_status_transition(&self) -> Result<AssignmentOutcome> {
        let shipment = self
            .state
            .read()
            .await
            .created_shipment
            .clone()
            .ok_or_else(|| {
                FreightlineError::internal("no shipment to reconcile; submit first")
            })?;
        match self.orders.set_status(self.order_id, OrderStatus::Shipped).await {
            Ok(_) => Ok(AssignmentOutcome::Completed { shipment }),
            Err(status_error) => Ok(AssignmentOutcome::Partial {
                shipment,
                status_error,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use freightline_core::identity::{Credential, Identity, Role};
    use freightline_core::order::gateway::{NewOrder, OrderGateway};
    use freightline_core::order::model::Order;
    use freightline_core::session::SessionManager;
    use freightline_core::session::model::SessionState;
    use freightline_core::session::repository::SessionStateRepository;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullRepository;

    #[async_trait]
    impl SessionStateRepository for NullRepository {
        async fn load(&self) -> Result<Option<SessionState>> {
            Ok(None)
        }

        async fn save(&self, _state: &SessionState) -> Result<()> {
            Ok(())
        }
    }

    struct MockTransporterGateway {
        transporters: Vec<Transporter>,
    }

    #[async_trait]
    impl TransporterGateway for MockTransporterGateway {
        async fn fetch_with_vehicles(&self) -> Result<Vec<Transporter>> {
            Ok(self.transporters.clone())
        }
    }

    struct MockShipmentGateway {
        create_calls: AtomicUsize,
        fail_creates: Mutex<bool>,
    }

    impl MockShipmentGateway {
        fn new() -> Self {
            Self {
                create_calls: AtomicUsize::new(0),
                fail_creates: Mutex::new(false),
            }
        }
    }

    #[async_trait]
    impl ShipmentGateway for MockShipmentGateway {
        async fn list_shipments(&self) -> Result<Vec<Shipment>> {
            Ok(Vec::new())
        }

        async fn create_shipment(&self, request: &ShipmentRequest) -> Result<Shipment> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail_creates.lock().unwrap() {
                return Err(FreightlineError::transport("502 shipment create"));
            }
            Ok(Shipment {
                id: 900,
                order_id: request.order_id,
                vehicle_id: request.vehicle_id,
                transporter_id: 5,
                status: "Created".to_string(),
                created_at: "2024-05-01T12:00:00Z".to_string(),
            })
        }
    }

    struct MockOrderGateway {
        orders: Mutex<Vec<Order>>,
        fail_updates: Mutex<bool>,
    }

    #[async_trait]
    impl OrderGateway for MockOrderGateway {
        async fn fetch_orders(&self) -> Result<Vec<Order>> {
            Ok(self.orders.lock().unwrap().clone())
        }

        async fn create_order(&self, _order: &NewOrder) -> Result<Order> {
            Err(FreightlineError::internal("not used"))
        }

        async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<Order> {
            if *self.fail_updates.lock().unwrap() {
                return Err(FreightlineError::transport("503 status write"));
            }
            let mut orders = self.orders.lock().unwrap();
            let order = orders
                .iter_mut()
                .find(|o| o.id == order_id)
                .ok_or_else(|| FreightlineError::not_found("order", order_id.to_string()))?;
            order.status = status;
            Ok(order.clone())
        }
    }

    fn transporter(id: i64, user_id: i64, vehicle_ids: &[i64]) -> Transporter {
        Transporter {
            id,
            user_id,
            name: format!("carrier-{}", id),
            vehicles: vehicle_ids
                .iter()
                .map(|&vid| Vehicle {
                    id: vid,
                    plate_number: format!("PL-{}", vid),
                    vehicle_type: "truck".to_string(),
                })
                .collect(),
        }
    }

    struct Fixture {
        workflow: AssignmentWorkflow,
        shipments: Arc<MockShipmentGateway>,
        order_gateway: Arc<MockOrderGateway>,
        orders: Arc<OrderService>,
    }

    async fn fixture(transporters: Vec<Transporter>) -> Fixture {
        let session = Arc::new(SessionManager::new(Arc::new(NullRepository)));
        session
            .login(
                Identity {
                    id: 42,
                    name: "ava".to_string(),
                    email: "ava@example.com".to_string(),
                    role: Role::Transporter,
                },
                Credential::new("tok-42"),
            )
            .await
            .unwrap();

        let order_gateway = Arc::new(MockOrderGateway {
            orders: Mutex::new(vec![Order {
                id: 100,
                status: OrderStatus::Pending,
                total_amount: 10.0,
                created_at: "2024-05-01T10:00:00Z".to_string(),
                vendor_id: 1,
                warehouse_id: 2,
                location: None,
                items: Vec::new(),
            }]),
            fail_updates: Mutex::new(false),
        });
        let gate = RehydrationGate::new();
        gate.open();
        let orders = Arc::new(OrderService::new(
            order_gateway.clone(),
            session,
            gate.clone(),
        ));
        orders.refresh().await.unwrap();

        let shipments = Arc::new(MockShipmentGateway::new());
        let workflow = AssignmentWorkflow::new(
            100,
            Arc::new(MockTransporterGateway { transporters }),
            shipments.clone(),
            orders.clone(),
            gate,
        );
        Fixture {
            workflow,
            shipments,
            order_gateway,
            orders,
        }
    }

    #[tokio::test]
    async fn test_stage_progression_through_selection() {
        let f = fixture(vec![transporter(5, 50, &[7, 8])]).await;
        assert_eq!(f.workflow.stage().await, AssignmentStage::Idle);

        f.workflow.load_transporters().await.unwrap();
        assert_eq!(
            f.workflow.stage().await,
            AssignmentStage::TransporterListLoaded
        );

        f.workflow.select_transporter(5).await.unwrap();
        assert_eq!(
            f.workflow.stage().await,
            AssignmentStage::VehicleListAvailable
        );
        assert_eq!(f.workflow.vehicles().await.len(), 2);

        f.workflow.select_vehicle(7).await.unwrap();
        assert_eq!(f.workflow.stage().await, AssignmentStage::VehicleSelected);
    }

    #[tokio::test]
    async fn test_vehicleless_transporter_stalls_before_vehicle_stage() {
        let f = fixture(vec![transporter(5, 50, &[])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        assert_eq!(
            f.workflow.stage().await,
            AssignmentStage::TransporterSelected
        );
        assert!(f.workflow.vehicles().await.is_empty());

        let err = f.workflow.select_vehicle(7).await.unwrap_err();
        assert!(matches!(err, FreightlineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_submit_without_selection_fails_before_any_network() {
        let f = fixture(vec![transporter(5, 50, &[7])]).await;
        f.workflow.load_transporters().await.unwrap();

        let err = f.workflow.submit().await.unwrap_err();
        assert!(err.is_incomplete_assignment());
        assert_eq!(f.shipments.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_with_vehicle_unset_fails_before_any_network() {
        let f = fixture(vec![transporter(5, 50, &[9])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        assert_eq!(
            f.workflow.stage().await,
            AssignmentStage::VehicleListAvailable
        );

        let err = f.workflow.submit().await.unwrap_err();
        assert!(matches!(
            err,
            FreightlineError::IncompleteAssignment { missing: "vehicle" }
        ));
        assert_eq!(f.shipments.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_submission_creates_shipment_and_ships_order() {
        let f = fixture(vec![transporter(5, 50, &[7])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        f.workflow.select_vehicle(7).await.unwrap();

        let outcome = f.workflow.submit().await.unwrap();
        assert!(!outcome.is_partial());
        let shipment = outcome.shipment();
        assert_eq!(shipment.order_id, 100);
        assert_eq!(shipment.vehicle_id, 7);
        assert_eq!(f.workflow.stage().await, AssignmentStage::Completed);
        assert_eq!(
            f.orders.order(100).await.unwrap().status,
            OrderStatus::Shipped
        );
    }

    #[tokio::test]
    async fn test_shipment_request_carries_the_transporters_user_id() {
        let f = fixture(vec![transporter(5, 77, &[7])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        f.workflow.select_vehicle(7).await.unwrap();

        // The mock echoes the request fields back into the shipment; a
        // wrong user_id would fail creation on a real backend.
        let outcome = f.workflow.submit().await.unwrap();
        assert_eq!(outcome.shipment().vehicle_id, 7);
        assert_eq!(f.shipments.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_creation_failure_preserves_selections_and_allows_retry() {
        let f = fixture(vec![transporter(5, 50, &[7])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        f.workflow.select_vehicle(7).await.unwrap();

        *f.shipments.fail_creates.lock().unwrap() = true;
        let err = f.workflow.submit().await.unwrap_err();
        assert!(matches!(err, FreightlineError::AssignmentSubmitFailed(_)));
        assert_eq!(f.workflow.stage().await, AssignmentStage::Failed);
        assert_eq!(f.workflow.vehicles().await.len(), 1);

        // No shipment exists yet, so a second submit is a clean retry.
        *f.shipments.fail_creates.lock().unwrap() = false;
        let outcome = f.workflow.submit().await.unwrap();
        assert!(!outcome.is_partial());
        assert_eq!(f.shipments.create_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_status_failure_after_creation_is_partial_not_error() {
        let f = fixture(vec![transporter(5, 50, &[7])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        f.workflow.select_vehicle(7).await.unwrap();

        *f.order_gateway.fail_updates.lock().unwrap() = true;
        let outcome = f.workflow.submit().await.unwrap();
        assert!(outcome.is_partial());
        assert_eq!(f.workflow.stage().await, AssignmentStage::Completed);
        // The optimistic edit rolled back; the order is still Pending.
        assert_eq!(
            f.orders.order(100).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_partial_retry_reconciles_without_second_shipment() {
        let f = fixture(vec![transporter(5, 50, &[7])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        f.workflow.select_vehicle(7).await.unwrap();

        *f.order_gateway.fail_updates.lock().unwrap() = true;
        let outcome = f.workflow.submit().await.unwrap();
        assert!(outcome.is_partial());

        *f.order_gateway.fail_updates.lock().unwrap() = false;
        let outcome = f.workflow.retry_status_transition().await.unwrap();
        assert!(!outcome.is_partial());
        assert_eq!(f.shipments.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            f.orders.order(100).await.unwrap().status,
            OrderStatus::Shipped
        );

        // Submit after completion refuses to create a duplicate.
        let err = f.workflow.submit().await.unwrap_err();
        assert!(matches!(err, FreightlineError::Internal(_)));
        assert_eq!(f.shipments.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reloading_transporters_clears_selections() {
        let f = fixture(vec![transporter(5, 50, &[7])]).await;
        f.workflow.load_transporters().await.unwrap();
        f.workflow.select_transporter(5).await.unwrap();
        f.workflow.select_vehicle(7).await.unwrap();

        f.workflow.load_transporters().await.unwrap();
        assert_eq!(
            f.workflow.stage().await,
            AssignmentStage::TransporterListLoaded
        );
        assert!(f.workflow.vehicles().await.is_empty());
    }
}
