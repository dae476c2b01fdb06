//! HTTP API server for the order processing system.
//!
//! Exposes order intake and retrieval endpoints, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::WorkItem;
use domain::{OrderIntakeService, OrderRetrievalService};
use messaging::{
    InMemoryWorkQueue, LoggingNotifier, MetricsSink, PrometheusSink, WorkQueue,
};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderStore, OrderStore};
use saga::{OrderSaga, SagaWorker, SimulatedInventoryGateway, SimulatedPaymentGateway};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, Q, M>(state: Arc<AppState<S, Q, M>>, metrics_handle: PrometheusHandle) -> Router
where
    S: OrderStore + 'static,
    Q: WorkQueue<WorkItem> + 'static,
    M: MetricsSink + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create::<S, Q, M>))
        .route("/orders", get(routes::orders::list::<S, Q, M>))
        .route("/orders/{id}", get(routes::orders::get::<S, Q, M>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Application state backed by the in-memory store and simulated gateways.
pub type DefaultAppState = AppState<InMemoryOrderStore, InMemoryWorkQueue<WorkItem>, PrometheusSink>;

/// Worker wired against the same store and queue as [`DefaultAppState`].
pub type DefaultWorker = SagaWorker<
    InMemoryOrderStore,
    SimulatedPaymentGateway,
    SimulatedInventoryGateway,
    LoggingNotifier,
    PrometheusSink,
>;

/// Creates the default application state plus the saga worker that
/// consumes its queue. The queue handle is returned so the caller can
/// close it on shutdown.
pub fn create_default_state(
    config: &Config,
) -> (Arc<DefaultAppState>, DefaultWorker, InMemoryWorkQueue<WorkItem>) {
    let store = InMemoryOrderStore::new();
    let queue = InMemoryWorkQueue::new();

    let state = Arc::new(AppState {
        intake: OrderIntakeService::new(store.clone(), queue.clone(), PrometheusSink),
        retrieval: OrderRetrievalService::new(store.clone()),
        metrics: PrometheusSink,
    });

    let payment =
        SimulatedPaymentGateway::new(config.payment_success_rate, config.payment_latency);
    let inventory =
        SimulatedInventoryGateway::new(config.inventory_success_rate, config.inventory_latency);
    let saga = OrderSaga::new(store, payment, inventory, LoggingNotifier, PrometheusSink);
    let worker = SagaWorker::new(queue.clone(), saga);

    (state, worker, queue)
}
