//! Wire DTOs for the verification endpoints and the public result type.
//!
//! Field names on the wire are fixed by the upstream service (camelCase).

use serde::{Deserialize, Serialize};

/// Body of the send-verification-code call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartVerificationRequest {
    pub phone_number: String,
    pub recaptcha_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartVerificationResponse {
    #[serde(default)]
    pub session_info: String,
}

/// Body of the verify-phone-number call. `session_info` is echoed back
/// unchanged from the start step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompleteVerificationRequest {
    pub session_info: String,
    pub code: String,
}

/// Success payload of the verify-phone-number call. Refresh tokens and
/// expiry returned alongside are ignored. Missing fields decode to their
/// zero values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompleteVerificationResponse {
    pub id_token: String,
    pub is_new_user: bool,
    pub phone_number: String,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationInfo {
    pub id_token: String,
    pub is_new_user: bool,
    pub phone_number: String,
}

impl From<CompleteVerificationResponse> for VerificationInfo {
    fn from(resp: CompleteVerificationResponse) -> Self {
        Self {
            id_token: resp.id_token,
            is_new_user: resp.is_new_user,
            phone_number: resp.phone_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_request_uses_wire_field_names() {
        let req = StartVerificationRequest {
            phone_number: "+15551234567".to_string(),
            recaptcha_token: "captcha".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["phoneNumber"], "+15551234567");
        assert_eq!(json["recaptchaToken"], "captcha");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn complete_request_uses_wire_field_names() {
        let req = CompleteVerificationRequest {
            session_info: "abc123".to_string(),
            code: "123456".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["sessionInfo"], "abc123");
        assert_eq!(json["code"], "123456");
    }

    #[test]
    fn complete_response_defaults_is_new_user() {
        let resp: CompleteVerificationResponse =
            serde_json::from_str(r#"{"idToken":"tok","phoneNumber":"+15551234567"}"#).unwrap();
        assert!(!resp.is_new_user);
    }

    #[test]
    fn complete_response_ignores_session_fields() {
        let resp: CompleteVerificationResponse = serde_json::from_str(
            r#"{"idToken":"tok","refreshToken":"r","expiresIn":"3600","localId":"u1","isNewUser":true,"phoneNumber":"+1"}"#,
        )
        .unwrap();
        assert_eq!(
            VerificationInfo::from(resp),
            VerificationInfo {
                id_token: "tok".to_string(),
                is_new_user: true,
                phone_number: "+1".to_string(),
            }
        );
    }

    #[test]
    fn complete_response_zero_fills_missing_fields() {
        let resp: CompleteVerificationResponse =
            serde_json::from_str(r#"{"isNewUser":true,"phoneNumber":"+1"}"#).unwrap();
        assert_eq!(resp.id_token, "");
        assert!(resp.is_new_user);

        let resp: CompleteVerificationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, CompleteVerificationResponse::default());
    }

    #[test]
    fn start_response_zero_fills_missing_session() {
        let resp: StartVerificationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.session_info, "");
    }

    #[test]
    fn responses_still_reject_wrong_types() {
        assert!(serde_json::from_str::<StartVerificationResponse>(r#""abc123""#).is_err());
        assert!(serde_json::from_str::<CompleteVerificationResponse>(r#"{"idToken":5}"#).is_err());
    }
}
