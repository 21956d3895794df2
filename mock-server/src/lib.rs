use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const SEND_VERIFICATION_CODE_PATH: &str = "/identitytoolkit/v3/relyingparty/sendVerificationCode";
pub const VERIFY_PHONE_NUMBER_PATH: &str = "/identitytoolkit/v3/relyingparty/verifyPhoneNumber";

/// Credentials the mock accepts.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub api_key: String,
    pub recaptcha_token: String,
    pub code: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_key: "test-api-key".to_string(),
            recaptcha_token: "valid-captcha".to_string(),
            code: "123456".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationCode {
    pub phone_number: String,
    pub recaptcha_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_info: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPhoneNumber {
    pub session_info: String,
    pub code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedPhone {
    pub id_token: String,
    pub refresh_token: String,
    pub is_new_user: bool,
    pub phone_number: String,
}

#[derive(Deserialize)]
pub struct KeyParam {
    pub key: Option<String>,
}

#[derive(Default)]
struct Sessions {
    pending: HashMap<String, String>,
    known_numbers: HashSet<String>,
}

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    sessions: Arc<RwLock<Sessions>>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<serde_json::Value>)>;

pub fn app(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        sessions: Arc::new(RwLock::new(Sessions::default())),
    };
    Router::new()
        .route(SEND_VERIFICATION_CODE_PATH, post(send_verification_code))
        .route(VERIFY_PHONE_NUMBER_PATH, post(verify_phone_number))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

async fn send_verification_code(
    State(state): State<AppState>,
    Query(params): Query<KeyParam>,
    body: String,
) -> ApiResult<SessionInfo> {
    check_key(&state.config, &params)?;
    let input: SendVerificationCode = parse_body(&body)?;
    if input.recaptcha_token != state.config.recaptcha_token {
        return Err(bad_request("CAPTCHA_CHECK_FAILED : Recaptcha verification failed"));
    }
    if input.phone_number.trim().is_empty() {
        return Err(bad_request("MISSING_PHONE_NUMBER"));
    }

    let session_info = Uuid::new_v4().to_string();
    state
        .sessions
        .write()
        .await
        .pending
        .insert(session_info.clone(), input.phone_number);
    tracing::debug!(session = %session_info, "issued verification session");
    Ok(Json(SessionInfo { session_info }))
}

async fn verify_phone_number(
    State(state): State<AppState>,
    Query(params): Query<KeyParam>,
    body: String,
) -> ApiResult<VerifiedPhone> {
    check_key(&state.config, &params)?;
    let input: VerifyPhoneNumber = parse_body(&body)?;

    let mut sessions = state.sessions.write().await;
    if !sessions.pending.contains_key(&input.session_info) {
        return Err(bad_request("INVALID_SESSION_INFO"));
    }
    if input.code != state.config.code {
        return Err(bad_request("INVALID_CODE"));
    }
    let Some(phone_number) = sessions.pending.remove(&input.session_info) else {
        return Err(bad_request("INVALID_SESSION_INFO"));
    };
    let is_new_user = sessions.known_numbers.insert(phone_number.clone());

    Ok(Json(VerifiedPhone {
        id_token: format!("mock-id-token-{}", Uuid::new_v4()),
        refresh_token: format!("mock-refresh-token-{}", Uuid::new_v4()),
        is_new_user,
        phone_number,
    }))
}

fn check_key(config: &MockConfig, params: &KeyParam) -> Result<(), (StatusCode, Json<serde_json::Value>)> {
    if params.key.as_deref() == Some(config.api_key.as_str()) {
        return Ok(());
    }
    Err((
        StatusCode::FORBIDDEN,
        Json(error_body(
            StatusCode::FORBIDDEN,
            "The request is missing a valid API key.",
        )),
    ))
}

/// Handlers call this after `check_key`: a bad key answers 403 even when the
/// body is malformed.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, (StatusCode, Json<serde_json::Value>)> {
    serde_json::from_str(body).map_err(|e| bad_request(&format!("Invalid JSON payload received. {e}")))
}

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(error_body(StatusCode::BAD_REQUEST, message)),
    )
}

fn error_body(status: StatusCode, message: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": status.as_u16(),
            "message": message,
            "errors": [{ "message": message, "domain": "global", "reason": "invalid" }],
        }
    })
}
