use api_types::RestResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{run, run_with_listener, spawn_with_listener};

mod merchants;
mod server;
mod transactions;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{
            DateRangeView, DetailView, SummaryView, TransactionCreated, TransactionDraft,
            TransactionListResponse, TransactionView,
        };
    }

    pub mod merchant {
        pub use api_types::merchant::{
            CreateMerchantRequest, CreateMerchantResponse, MerchantListResponse, MerchantView,
            UpdateMerchantRequest, UpdateMerchantResponse,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(RestResponse::error(status.as_u16(), message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
