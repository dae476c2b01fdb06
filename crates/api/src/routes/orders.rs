//! Order intake and retrieval endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{Order, OrderId, OrderItem, OrderStatus, WorkItem};
use domain::{OrderIntakeService, OrderPayload, OrderRetrievalService};
use messaging::{MetricsSink, WorkQueue};
use order_store::OrderStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S, Q, M> {
    pub intake: OrderIntakeService<S, Q, M>,
    pub retrieval: OrderRetrievalService<S>,
    /// Same sink the intake service uses; lets the boundary count
    /// failures that never reach the service.
    pub metrics: M,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub message: &'static str,
    pub order_id: OrderId,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub customer_id: String,
    pub items: Vec<OrderItemResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub updated_at: DateTime<Utc>,
    pub customer_email: String,
    pub shipping_address: serde_json::Value,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            created_at: order.created_at,
            customer_id: order.customer_id,
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount,
            status: order.status,
            updated_at: order.updated_at,
            customer_email: order.customer_email,
            shipping_address: order.shipping_address,
        }
    }
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ListFilter {
    pub status: OrderStatus,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub orders: Vec<OrderResponse>,
    pub count: usize,
    pub filter: Option<ListFilter>,
}

// -- Handlers --

/// POST /orders — validate and create a new order.
#[tracing::instrument(skip_all)]
pub async fn create<S, Q, M>(
    State(state): State<Arc<AppState<S, Q, M>>>,
    body: String,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError>
where
    S: OrderStore,
    Q: WorkQueue<WorkItem>,
    M: MetricsSink,
{
    let payload: OrderPayload = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(_) => {
            // Rejected before the intake service runs, so the error
            // counter has to be bumped here.
            state
                .metrics
                .incr("order_creation_errors_total", &[("reason", "invalid_json")]);
            return Err(ApiError::InvalidJson(
                "Request body must be valid JSON".to_string(),
            ));
        }
    };

    let order = state
        .intake
        .submit(payload)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create order"))?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            message: "Order created successfully",
            order_id: order.order_id,
            status: order.status,
            total_amount: order.total_amount,
            created_at: order.created_at,
        }),
    ))
}

/// GET /orders/{id} — fetch one order.
#[tracing::instrument(skip(state))]
pub async fn get<S, Q, M>(
    State(state): State<Arc<AppState<S, Q, M>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrderStore,
{
    // A malformed id cannot name any stored order, so it reads as absent.
    let order_id = id
        .parse::<uuid::Uuid>()
        .map(OrderId::from_uuid)
        .map_err(|_| ApiError::NotFound(format!("Order {id} not found")))?;

    let order = state
        .retrieval
        .get_by_id(order_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to retrieve order"))?;

    Ok(Json(order.into()))
}

/// GET /orders — list orders, optionally filtered by status.
#[tracing::instrument(skip(state))]
pub async fn list<S, Q, M>(
    State(state): State<Arc<AppState<S, Q, M>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError>
where
    S: OrderStore,
{
    let (orders, filter) = state
        .retrieval
        .list(params.status.as_deref(), params.limit)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to retrieve orders"))?;

    Ok(Json(ListResponse {
        count: orders.len(),
        orders: orders.into_iter().map(Into::into).collect(),
        filter: filter.map(|status| ListFilter { status }),
    }))
}
