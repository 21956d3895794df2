//! Builds outbound verification requests.
//!
//! Both endpoints take the same shape: a POST with the API key in the `key`
//! query parameter and a JSON body. Nothing here touches the network.

use serde::Serialize;
use url::Url;

use crate::error::BuildError;
use crate::http::{HttpMethod, HttpRequest};

const APPLICATION_JSON: &str = "application/json";

/// Build a POST to `endpoint` carrying `payload` as JSON and `api_key` as the
/// form-encoded `key` query parameter.
pub fn build_verification_request<T: Serialize>(
    endpoint: &str,
    api_key: &str,
    payload: &T,
) -> Result<HttpRequest, BuildError> {
    let mut url = Url::parse(endpoint).map_err(|source| BuildError::InvalidEndpoint {
        url: endpoint.to_string(),
        source,
    })?;
    url.query_pairs_mut().append_pair("key", api_key);

    let body = serde_json::to_string(payload).map_err(BuildError::Serialize)?;

    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: url.into(),
        headers: vec![
            ("Accept".to_string(), APPLICATION_JSON.to_string()),
            ("Content-type".to_string(), APPLICATION_JSON.to_string()),
        ],
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompleteVerificationRequest, StartVerificationRequest};

    const ENDPOINT: &str = "https://identity.example.com/v3/relyingparty/sendVerificationCode";

    fn start_payload() -> StartVerificationRequest {
        StartVerificationRequest {
            phone_number: "+15551234567".to_string(),
            recaptcha_token: "captcha-token".to_string(),
        }
    }

    #[test]
    fn builds_post_with_key_and_json_headers() {
        let req = build_verification_request(ENDPOINT, "secret", &start_payload()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, format!("{ENDPOINT}?key=secret"));
        assert_eq!(
            req.headers,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Content-type".to_string(), "application/json".to_string()),
            ]
        );
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body["phoneNumber"], "+15551234567");
        assert_eq!(body["recaptchaToken"], "captcha-token");
    }

    #[test]
    fn api_key_is_url_encoded() {
        let req = build_verification_request(ENDPOINT, "a b&c=d", &start_payload()).unwrap();
        assert_eq!(req.url, format!("{ENDPOINT}?key=a+b%26c%3Dd"));

        let parsed = Url::parse(&req.url).unwrap();
        let key = parsed
            .query_pairs()
            .find(|(name, _)| name == "key")
            .map(|(_, value)| value.into_owned());
        assert_eq!(key.as_deref(), Some("a b&c=d"));
    }

    #[test]
    fn existing_query_parameters_are_kept() {
        let req = build_verification_request(
            "https://identity.example.com/verify?alt=json",
            "secret",
            &start_payload(),
        )
        .unwrap();
        assert_eq!(req.url, "https://identity.example.com/verify?alt=json&key=secret");
    }

    #[test]
    fn complete_body_uses_session_and_code() {
        let payload = CompleteVerificationRequest {
            session_info: "abc123".to_string(),
            code: "654321".to_string(),
        };
        let req = build_verification_request(ENDPOINT, "secret", &payload).unwrap();
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body, serde_json::json!({"sessionInfo": "abc123", "code": "654321"}));
    }

    #[test]
    fn malformed_endpoint_is_reported() {
        let err = build_verification_request("not a url", "secret", &start_payload()).unwrap_err();
        assert!(matches!(err, BuildError::InvalidEndpoint { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn building_twice_is_deterministic() {
        let first = build_verification_request(ENDPOINT, "secret", &start_payload()).unwrap();
        let second = build_verification_request(ENDPOINT, "secret", &start_payload()).unwrap();
        assert_eq!(first, second);
    }
}
