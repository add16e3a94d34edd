use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::account::models::SignupRequest;
use crate::account::ports::SignupServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup<S: SignupServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<SignupRequestBody>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    state
        .signup_service
        .signup(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for signup (raw JSON)
#[derive(Clone, Deserialize)]
pub struct SignupRequestBody {
    email: String,
    password: String,
}

impl From<SignupRequestBody> for SignupRequest {
    fn from(body: SignupRequestBody) -> Self {
        SignupRequest::new(body.email, body.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub id: i64,
    pub email: String,
    pub email_verified: bool,
    pub created_date: DateTime<Utc>,
}

impl From<&Account> for SignupResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.0,
            email: account.email.as_str().to_string(),
            email_verified: account.email_verified,
            created_date: account.created_date,
        }
    }
}
