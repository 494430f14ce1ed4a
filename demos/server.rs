//! Simple REST API server example for the change calculator.
//!
//! Run with: `cargo run --example server`
//!
//! ## Endpoints
//!
//! - `POST /change` - Compute the change breakdown for one transaction
//! - `POST /change/batch` - Compute formatted change lines for a batch
//! - `GET /currency` - Show the configured denomination table
//!
//! ## Example Usage
//!
//! ```bash
//! # Single transaction
//! curl -X POST http://localhost:3000/change \
//!   -H "Content-Type: application/json" \
//!   -d '{"owed": "2.12", "paid": "3.00"}'
//!
//! # Batch
//! curl -X POST http://localhost:3000/change/batch \
//!   -H "Content-Type: application/json" \
//!   -d '{"transactions": [{"owed": "2.12", "paid": "3.00"}, {"owed": "1.97", "paid": "2.00"}]}'
//!
//! # Denomination table
//! curl http://localhost:3000/currency
//! ```

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use cashier_rs::{ChangeCalculator, ChangeError, ChangeResult, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

// === Request/Response DTOs ===

/// Request body for a single change calculation.
///
/// Amounts arrive as decimal strings in major currency units:
/// ```json
/// {"owed": "2.12", "paid": "3.00"}
/// ```
#[derive(Debug, Deserialize)]
pub struct ChangeRequest {
    pub owed: Decimal,
    pub paid: Decimal,
}

/// Request body for batch change calculation.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub transactions: Vec<ChangeRequest>,
}

/// One denomination entry of a change breakdown.
#[derive(Debug, Serialize)]
pub struct DenominationCount {
    pub name: String,
    pub count: u64,
}

/// Response body for a single change calculation.
#[derive(Debug, Serialize)]
pub struct ChangeResponse {
    pub total: i64,
    pub denominations: Vec<DenominationCount>,
    pub formatted: String,
}

impl From<ChangeResult> for ChangeResponse {
    fn from(result: ChangeResult) -> Self {
        ChangeResponse {
            total: result.total(),
            denominations: result
                .denominations()
                .iter()
                .map(|(name, count)| DenominationCount {
                    name: name.clone(),
                    count: *count,
                })
                .collect(),
            formatted: result.formatted().to_string(),
        }
    }
}

/// Response body for batch calculation: one line per input pair, in order.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub lines: Vec<String>,
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing the calculator.
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<ChangeCalculator>,
}

// === Error Handling ===

/// Wrapper for converting `ChangeError` into HTTP responses.
pub struct AppError(ChangeError);

impl From<ChangeError> for AppError {
    fn from(err: ChangeError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            ChangeError::InvalidAmount => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            ChangeError::InsufficientPayment => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_PAYMENT")
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /change - Compute the breakdown for one transaction.
async fn post_change(
    State(state): State<AppState>,
    Json(request): Json<ChangeRequest>,
) -> Result<Json<ChangeResponse>, AppError> {
    let result = state
        .calculator
        .calculate_change_decimal(request.owed, request.paid)?;
    Ok(Json(ChangeResponse::from(result)))
}

/// POST /change/batch - Compute formatted lines for a batch, in input order.
async fn post_change_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let pairs: Vec<(Decimal, Decimal)> = request
        .transactions
        .iter()
        .map(|tx| (tx.owed, tx.paid))
        .collect();
    let lines = state.calculator.calculate_change_batch(&pairs)?;
    Ok(Json(BatchResponse { lines }))
}

/// GET /currency - Show the configured denomination table.
async fn get_currency(State(state): State<AppState>) -> Json<Currency> {
    Json(state.calculator.currency().clone())
}

// === Router ===

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/change", post(post_change))
        .route("/change/batch", post(post_change_batch))
        .route("/currency", get(get_currency))
        .with_state(state)
}

// === Main ===

#[tokio::main]
async fn main() {
    let state = AppState {
        calculator: Arc::new(ChangeCalculator::new(Arc::new(Currency::usd()), None)),
    };

    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:3000").await.unwrap();
    println!("Cashier API server running on http://127.0.0.1:3000");
    println!();
    println!("Endpoints:");
    println!("  POST /change        - Compute change for one transaction");
    println!("  POST /change/batch  - Compute change for a batch");
    println!("  GET  /currency      - Show the denomination table");

    axum::serve(listener, app).await.unwrap();
}
