//! Two-step phone verification client.
//!
//! # Design
//! `VerificationClient` holds the API key, the endpoint URLs and an
//! `HttpExecutor`, and carries no mutable state between calls. Each
//! operation is split the same way: `build_*` produces an `HttpRequest`,
//! `parse_*` turns an `HttpResponse` into a typed result, and the
//! `start_verification` / `complete_verification` methods run both around
//! a single call to the executor. Hosts that do their own I/O can skip the
//! executor and use the `build_*` / `parse_*` pair directly.
//!
//! Classified errors are returned as-is so their `ErrorKind` survives. Build,
//! transport and decode failures are wrapped with the operation name.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::classify::{classify, decode};
use crate::config::{ClientConfig, Endpoints};
use crate::error::{Operation, VerificationError};
use crate::http::{HttpExecutor, HttpRequest, HttpResponse};
use crate::request::build_verification_request;
use crate::transport::UreqExecutor;
use crate::types::{
    CompleteVerificationRequest, CompleteVerificationResponse, StartVerificationRequest,
    StartVerificationResponse, VerificationInfo,
};

/// The two verification operations, for callers that want to substitute
/// their own implementation.
pub trait PhoneVerifier {
    /// Ask upstream to text a code to `phone_number`. Returns the session
    /// handle to pass to `complete_verification`.
    fn start_verification(
        &self,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<String, VerificationError>;

    /// Exchange the session handle and the received code for an identity
    /// token.
    fn complete_verification(
        &self,
        session_info: &str,
        code: &str,
    ) -> Result<VerificationInfo, VerificationError>;
}

#[derive(Clone)]
pub struct VerificationClient<E = UreqExecutor> {
    api_key: String,
    endpoints: Endpoints,
    executor: E,
}

impl VerificationClient<UreqExecutor> {
    /// Client with the default executor (20 second timeout) and production
    /// endpoints.
    pub fn new(api_key: impl Into<String>) -> Result<Self, VerificationError> {
        Self::with_executor(api_key, UreqExecutor::new())
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, VerificationError> {
        let client = Self::with_executor(config.api_key, UreqExecutor::with_timeout(config.timeout))?;
        Ok(client.with_endpoints(config.endpoints))
    }
}

impl<E: HttpExecutor> VerificationClient<E> {
    /// Fails with `EmptyApiKey` if `api_key` is empty or only whitespace.
    pub fn with_executor(api_key: impl Into<String>, executor: E) -> Result<Self, VerificationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(VerificationError::EmptyApiKey);
        }
        Ok(Self {
            api_key,
            endpoints: Endpoints::default(),
            executor,
        })
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn build_start_verification(
        &self,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<HttpRequest, VerificationError> {
        let payload = StartVerificationRequest {
            phone_number: phone_number.to_string(),
            recaptcha_token: recaptcha_token.to_string(),
        };
        build_verification_request(&self.endpoints.send_verification_code, &self.api_key, &payload).map_err(
            |source| VerificationError::Build {
                operation: Operation::StartVerification,
                source,
            },
        )
    }

    pub fn parse_start_verification(&self, response: &HttpResponse) -> Result<String, VerificationError> {
        let resp: StartVerificationResponse = parse_response(Operation::StartVerification, response)?;
        Ok(resp.session_info)
    }

    pub fn build_complete_verification(
        &self,
        session_info: &str,
        code: &str,
    ) -> Result<HttpRequest, VerificationError> {
        let payload = CompleteVerificationRequest {
            session_info: session_info.to_string(),
            code: code.to_string(),
        };
        build_verification_request(&self.endpoints.verify_phone_number, &self.api_key, &payload).map_err(
            |source| VerificationError::Build {
                operation: Operation::CompleteVerification,
                source,
            },
        )
    }

    pub fn parse_complete_verification(
        &self,
        response: &HttpResponse,
    ) -> Result<VerificationInfo, VerificationError> {
        let resp: CompleteVerificationResponse = parse_response(Operation::CompleteVerification, response)?;
        Ok(resp.into())
    }

    pub fn start_verification(
        &self,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<String, VerificationError> {
        debug!(phone = %mask_phone_number(phone_number), "starting verification");
        let request = self.build_start_verification(phone_number, recaptcha_token)?;
        let response = self.execute(Operation::StartVerification, &request)?;
        self.parse_start_verification(&response)
    }

    pub fn complete_verification(
        &self,
        session_info: &str,
        code: &str,
    ) -> Result<VerificationInfo, VerificationError> {
        debug!(session_len = session_info.len(), "completing verification");
        let request = self.build_complete_verification(session_info, code)?;
        let response = self.execute(Operation::CompleteVerification, &request)?;
        self.parse_complete_verification(&response)
    }

    fn execute(&self, operation: Operation, request: &HttpRequest) -> Result<HttpResponse, VerificationError> {
        self.executor
            .execute(request)
            .map_err(|source| VerificationError::Transport { operation, source })
    }
}

impl<E: HttpExecutor> PhoneVerifier for VerificationClient<E> {
    fn start_verification(
        &self,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<String, VerificationError> {
        VerificationClient::start_verification(self, phone_number, recaptcha_token)
    }

    fn complete_verification(
        &self,
        session_info: &str,
        code: &str,
    ) -> Result<VerificationInfo, VerificationError> {
        VerificationClient::complete_verification(self, session_info, code)
    }
}

impl<E> fmt::Debug for VerificationClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationClient")
            .field("api_key", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

fn parse_response<T: DeserializeOwned>(
    operation: Operation,
    response: &HttpResponse,
) -> Result<T, VerificationError> {
    if let Err(err) = classify(response.status, &response.body) {
        debug!(%operation, status = response.status, kind = ?err.kind(), "verification rejected upstream");
        return Err(err);
    }
    decode(&response.body).map_err(|source| VerificationError::Decode { operation, source })
}

/// Keep the country-code prefix and the last four digits for logs.
fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}****{tail}")
    } else {
        "****".to_string()
    }
}
