//! Maps upstream status codes and bodies to typed outcomes.
//!
//! # Design
//! The upstream error schema is undocumented, so the 400 cases are detected
//! by substring match on the raw body. This is a known heuristic. All of it
//! lives here so a move to structured parsing only touches this module.
//!
//! Precedence is fixed: 403, then the captcha signature, then the code
//! signature, then any other non-200 status. A 400 body carrying both
//! signatures classifies as a captcha failure.

use serde::de::DeserializeOwned;

use crate::error::{ClassifiedError, ErrorKind, VerificationError};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_FORBIDDEN: u16 = 403;

/// Body signature of a rejected captcha token.
pub const CAPTCHA_CHECK_FAILED: &str = "CAPTCHA_CHECK_FAILED";
/// Body signature of a rejected confirmation code.
pub const INVALID_CODE: &str = "INVALID_CODE";

/// Decide whether an exchange succeeded. `Ok(())` means the body should be
/// decoded as the success payload.
pub fn classify(status: u16, body: &str) -> Result<(), VerificationError> {
    if status == STATUS_FORBIDDEN {
        return Err(classified(
            ErrorKind::InvalidApiKey,
            format!("Forbidden ({status}), likely missing key. body: {body}"),
        ));
    }

    if status == STATUS_BAD_REQUEST && body.contains(CAPTCHA_CHECK_FAILED) {
        return Err(classified(
            ErrorKind::InvalidCaptchaKey,
            format!("Bad request ({status}), captcha verification failed. body: {body}"),
        ));
    }

    if status == STATUS_BAD_REQUEST && body.contains(INVALID_CODE) {
        return Err(classified(
            ErrorKind::InvalidConfirmationCode,
            format!("Bad request ({status}), invalid confirmation code. body: {body}"),
        ));
    }

    if status != STATUS_OK {
        return Err(VerificationError::Upstream {
            status,
            body: body.to_string(),
        });
    }

    Ok(())
}

/// Decode a success body.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(body)
}

fn classified(kind: ErrorKind, message: String) -> VerificationError {
    ClassifiedError { kind, message }.into()
}
