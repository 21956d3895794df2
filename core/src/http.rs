//! HTTP transport types and the executor seam.
//!
//! # Design
//! Requests and responses are plain owned data. The core builds
//! `HttpRequest` values and classifies `HttpResponse` values; moving bytes
//! over the network is the job of an `HttpExecutor`, which callers may
//! replace with their own implementation (or a deterministic fake in tests).

use std::sync::Arc;

use crate::error::TransportError;

/// HTTP method for a request. The verification protocol only ever POSTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` already carries the `key` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// An HTTP response described as plain data.
///
/// Any status code, including 4xx/5xx, is a valid response; classification
/// happens later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Executes one HTTP exchange.
///
/// Implementations must return non-success statuses as `Ok(HttpResponse)`
/// and reserve `Err` for failures where no response was obtained.
pub trait HttpExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for &E {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for Arc<E> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for Box<E> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
