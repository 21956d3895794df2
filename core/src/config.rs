//! Client configuration.

use std::time::Duration;

use crate::error::VerificationError;
use crate::transport::DEFAULT_TIMEOUT;

pub const SEND_VERIFICATION_CODE_ENDPOINT: &str =
    "https://www.googleapis.com/identitytoolkit/v3/relyingparty/sendVerificationCode";
pub const VERIFY_PHONE_NUMBER_ENDPOINT: &str =
    "https://www.googleapis.com/identitytoolkit/v3/relyingparty/verifyPhoneNumber";

const SEND_VERIFICATION_CODE_PATH: &str = "/identitytoolkit/v3/relyingparty/sendVerificationCode";
const VERIFY_PHONE_NUMBER_PATH: &str = "/identitytoolkit/v3/relyingparty/verifyPhoneNumber";

const API_KEY_VAR: &str = "PHONE_VERIFY_API_KEY";
const TIMEOUT_VAR: &str = "PHONE_VERIFY_TIMEOUT_SECS";
const BASE_URL_VAR: &str = "PHONE_VERIFY_BASE_URL";

/// Absolute URLs of the two verification endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub send_verification_code: String,
    pub verify_phone_number: String,
}

impl Endpoints {
    /// Point both endpoints at another host that serves the same paths.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            send_verification_code: format!("{base}{SEND_VERIFICATION_CODE_PATH}"),
            verify_phone_number: format!("{base}{VERIFY_PHONE_NUMBER_PATH}"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            send_verification_code: SEND_VERIFICATION_CODE_ENDPOINT.to_string(),
            verify_phone_number: VERIFY_PHONE_NUMBER_ENDPOINT.to_string(),
        }
    }
}

/// Everything needed to construct a `VerificationClient` with the default
/// executor.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub timeout: Duration,
    pub endpoints: Endpoints,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            endpoints: Endpoints::default(),
        }
    }

    /// Read configuration from the environment.
    ///
    /// `PHONE_VERIFY_API_KEY` is required. `PHONE_VERIFY_TIMEOUT_SECS` and
    /// `PHONE_VERIFY_BASE_URL` are optional.
    pub fn from_env() -> Result<Self, VerificationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, VerificationError> {
        let api_key =
            lookup(API_KEY_VAR).ok_or_else(|| VerificationError::Config(format!("{API_KEY_VAR} not set")))?;

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    VerificationError::Config(format!("{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"))
                })?;
                if secs == 0 {
                    return Err(VerificationError::Config(format!("{TIMEOUT_VAR} must be greater than zero")));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let endpoints = lookup(BASE_URL_VAR)
            .map(|base| Endpoints::with_base_url(&base))
            .unwrap_or_default();

        Ok(Self {
            api_key,
            timeout,
            endpoints,
        })
    }
}
