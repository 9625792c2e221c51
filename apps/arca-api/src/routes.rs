use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;

use arca_service::{
	ChatRequest, ChatResponse, Error as ServiceError, SearchRequest, SearchResponse, SyncInput,
	SyncStatus,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/sync", post(sync))
		.route("/api/sync/search", post(search))
		.route("/api/chat/query", post(chat))
		.with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthBody {
	status: &'static str,
	vector_store: bool,
}

/// Success envelope: `{ "success": true, ...body }`.
#[derive(Debug, Serialize)]
struct Success<T> {
	success: bool,
	#[serde(flatten)]
	body: T,
}
impl<T> Success<T> {
	fn new(body: T) -> Json<Self> {
		Json(Self { success: true, body })
	}
}

async fn health(State(state): State<AppState>) -> Response {
	if state.service.health_check().await {
		(StatusCode::OK, Json(HealthBody { status: "healthy", vector_store: true })).into_response()
	} else {
		(StatusCode::SERVICE_UNAVAILABLE, Json(HealthBody { status: "degraded", vector_store: false }))
			.into_response()
	}
}

async fn sync(
	State(state): State<AppState>,
	payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
	let Json(payload) = payload?;
	let report = state.service.sync(SyncInput::from(payload)).await?;
	let status = match report.status {
		SyncStatus::FullSuccess => StatusCode::OK,
		SyncStatus::Partial => StatusCode::MULTI_STATUS,
		SyncStatus::Failure => StatusCode::INTERNAL_SERVER_ERROR,
	};

	Ok((status, Json(report)).into_response())
}

async fn search(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Success<SearchResponse>>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.search(payload).await?;

	Ok(Success::new(response))
}

async fn chat(
	State(state): State<AppState>,
	payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Success<ChatResponse>>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.chat(payload).await?;

	Ok(Success::new(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	success: bool,
	error_code: &'static str,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
		Self { status, error_code, message: message.into() }
	}

	fn internal(error_code: &'static str) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, error_code, "Internal error.")
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let error_code = match &err {
			ServiceError::InvalidRequest { message } =>
				return Self::new(StatusCode::BAD_REQUEST, "invalid_request", message.clone()),
			ServiceError::Embedding { .. } => "embedding_failed",
			ServiceError::IndexWrite { .. } => "index_write_failed",
			ServiceError::IndexQuery { .. } => "index_query_failed",
			ServiceError::Generation { .. } => "generation_failed",
		};

		tracing::error!(error = %err, error_code, "Request failed.");

		Self::internal(error_code)
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { success: false, error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
