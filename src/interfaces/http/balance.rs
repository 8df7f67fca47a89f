use crate::domain::account::{AccountId, Balance};
use crate::domain::ports::AccountStore;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared state of the query surface: read-only access to account balances.
#[derive(Clone)]
pub struct ApiState {
    pub accounts: Arc<dyn AccountStore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceParams {
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct BalanceResponse {
    balance: Balance,
}

/// Builds the balance query router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/balance", get(get_balance))
        .with_state(state)
}

/// GET /balance?userId=<id>
///
/// Reads the account store only; no mutation. An unknown account reads as a
/// zero balance; a missing or non-numeric `userId` is a 400.
async fn get_balance(
    State(state): State<ApiState>,
    Query(params): Query<BalanceParams>,
) -> Result<Json<BalanceResponse>, StatusCode> {
    let user_id: AccountId = params
        .user_id
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .ok_or(StatusCode::BAD_REQUEST)?;

    match state.accounts.get(user_id).await {
        Ok(Some(account)) => Ok(Json(BalanceResponse {
            balance: account.balance,
        })),
        Ok(None) => Ok(Json(BalanceResponse {
            balance: Balance::ZERO,
        })),
        Err(fault) => {
            error!(user_id, %fault, "balance query failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
