//! Routes of the mock listing API.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, Uri};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::listings::{Agent, AgentQuery, Catalog, List, Page, Paging, Property, PropertyQuery};
use crate::server::error::ApiError;
use crate::server::health::health;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    paging: Paging,
}

impl AppState {
    pub fn new(catalog: Catalog, paging: Paging) -> Self {
        Self {
            catalog: Arc::new(catalog),
            paging,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/properties", get(list_properties))
        .route("/properties/{id}", get(get_property))
        .route("/agents", get(list_agents))
        .route("/agents/{id}", get(get_agent))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn list_properties(
    State(state): State<AppState>,
    query: Result<Query<PropertyQuery>, QueryRejection>,
) -> Result<Json<Page<Property>>, ApiError> {
    let Query(query) = query?;
    let page = state.catalog.search_properties(&query, state.paging)?;
    tracing::debug!(total = page.total, returned = page.items.len(), "Property search");
    Ok(Json(page))
}

async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    state
        .catalog
        .property(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Property", id))
}

async fn list_agents(
    State(state): State<AppState>,
    query: Result<Query<AgentQuery>, QueryRejection>,
) -> Result<Json<List<Agent>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.catalog.search_agents(&query)))
}

async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>, ApiError> {
    state
        .catalog
        .agent(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Agent", id))
}

async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}
