//! Client core for two-step phone number verification.
//!
//! # Overview
//! Step one asks the identity service to text a code to a phone number,
//! given a captcha token, and yields an opaque session handle. Step two
//! submits that handle with the code the user received and yields an
//! identity token plus an is-new-user flag.
//!
//! # Design
//! - `request` builds outbound requests, `classify` turns raw status and
//!   body into typed outcomes. Both are pure.
//! - `VerificationClient` composes them around an injected `HttpExecutor`.
//!   The default executor is a blocking `ureq` agent with a 20 second
//!   timeout.
//! - Three upstream failures carry an `ErrorKind` callers can branch on;
//!   everything else is reported for logging only.
//! - No retries, caching or token lifecycle: one exchange per call.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{PhoneVerifier, VerificationClient};
pub use config::{ClientConfig, Endpoints};
pub use error::{BuildError, ClassifiedError, ErrorKind, Operation, TransportError, VerificationError};
pub use http::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{UreqExecutor, DEFAULT_TIMEOUT};
pub use types::VerificationInfo;
