//! Transactional E-mail Relay Client
//!
//! Thin HTTP client for an EmailJS-compatible relay: the caller names a
//! service and a template, the relay fills the template with the given
//! parameters and delivers the message.
//!
//! ## Wire format
//! `POST {endpoint}` with a JSON body:
//! ```json
//! {
//!   "service_id": "...",
//!   "template_id": "...",
//!   "user_id": "<public key>",
//!   "template_params": { "to_email": "...", "certificate_pdf": "<base64>" }
//! }
//! ```
//! Binary parameters are sent Base64-encoded. Any 2xx response is success.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::crypto::to_base64;

/// Default relay endpoint (EmailJS REST API)
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Longest relay response body kept in a [`RelayError::Rejected`]
const MAX_ERROR_BODY_LEN: usize = 512;

/// Relay client errors
#[derive(Debug, Error)]
pub enum RelayError {
    /// A credential is empty; no request was sent
    #[error("E-mail relay is not configured: missing {0}")]
    NotConfigured(&'static str),

    /// Network or TLS failure
    #[error("E-mail relay transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status
    #[error("E-mail relay rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// A single template parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateParam {
    Text(String),
    Bytes(Vec<u8>),
}

impl TemplateParam {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TemplateParam::Text(s) => Some(s),
            TemplateParam::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TemplateParam::Text(_) => None,
            TemplateParam::Bytes(b) => Some(b),
        }
    }
}

impl From<String> for TemplateParam {
    fn from(s: String) -> Self {
        TemplateParam::Text(s)
    }
}

impl From<&str> for TemplateParam {
    fn from(s: &str) -> Self {
        TemplateParam::Text(s.to_string())
    }
}

impl From<Vec<u8>> for TemplateParam {
    fn from(b: Vec<u8>) -> Self {
        TemplateParam::Bytes(b)
    }
}

impl Serialize for TemplateParam {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TemplateParam::Text(s) => serializer.serialize_str(s),
            TemplateParam::Bytes(b) => serializer.serialize_str(&to_base64(b)),
        }
    }
}

/// Template parameters, ordered by name
pub type TemplateParams = BTreeMap<String, TemplateParam>;

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// HTTP client for the e-mail relay
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
    public_key: String,
}

impl RelayClient {
    /// Build a client
    ///
    /// ## Arguments
    /// * `endpoint` - Relay send URL
    /// * `public_key` - Account identity sent as `user_id`
    /// * `timeout` - Whole-request timeout; `None` waits indefinitely
    pub fn new(
        endpoint: impl Into<String>,
        public_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, RelayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
            public_key: public_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one templated message
    pub async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), RelayError> {
        check_credentials(&self.public_key, service_id, template_id)?;

        let body = SendRequest {
            service_id,
            template_id,
            user_id: &self.public_key,
            template_params: params,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            service_id,
            template_id,
            params = params.len(),
            "Sending relay request"
        );

        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY_LEN {
            let mut cut = MAX_ERROR_BODY_LEN;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        Err(RelayError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

fn check_credentials(public_key: &str, service_id: &str, template_id: &str) -> Result<(), RelayError> {
    if public_key.trim().is_empty() {
        return Err(RelayError::NotConfigured("public key"));
    }
    if service_id.trim().is_empty() {
        return Err(RelayError::NotConfigured("service id"));
    }
    if template_id.trim().is_empty() {
        return Err(RelayError::NotConfigured("template id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TemplateParams {
        let mut params = TemplateParams::new();
        params.insert("to_email".into(), "jane@example.com".into());
        params.insert("certificate_pdf".into(), b"%PDF-".to_vec().into());
        params
    }

    #[test]
    fn test_request_body_shape() {
        let params = params();
        let body = SendRequest {
            service_id: "service_x",
            template_id: "template_y",
            user_id: "public_z",
            template_params: &params,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["service_id"], "service_x");
        assert_eq!(json["template_id"], "template_y");
        assert_eq!(json["user_id"], "public_z");
        assert_eq!(json["template_params"]["to_email"], "jane@example.com");
        assert_eq!(json["template_params"]["certificate_pdf"], "JVBERi0=");
    }

    #[test]
    fn test_param_accessors() {
        let text = TemplateParam::from("farmer");
        assert_eq!(text.as_text(), Some("farmer"));
        assert!(text.as_bytes().is_none());

        let bytes = TemplateParam::from(vec![1u8, 2, 3]);
        assert_eq!(bytes.as_bytes(), Some(&[1u8, 2, 3][..]));
        assert!(bytes.as_text().is_none());
    }

    #[test]
    fn test_check_credentials() {
        assert!(check_credentials("pk", "svc", "tpl").is_ok());
        assert!(matches!(
            check_credentials("", "svc", "tpl"),
            Err(RelayError::NotConfigured("public key"))
        ));
        assert!(matches!(
            check_credentials("pk", " ", "tpl"),
            Err(RelayError::NotConfigured("service id"))
        ));
        assert!(matches!(
            check_credentials("pk", "svc", ""),
            Err(RelayError::NotConfigured("template id"))
        ));
    }

    mod relay_http {
        use super::*;
        use serde_json::json;
        use wiremock::matchers::{body_json, header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        fn client_for(server: &MockServer) -> RelayClient {
            RelayClient::new(format!("{}/api/v1.0/email/send", server.uri()), "public_z", None)
                .unwrap()
        }

        #[tokio::test]
        async fn test_send_posts_json_body() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/v1.0/email/send"))
                .and(header("content-type", "application/json"))
                .and(body_json(json!({
                    "service_id": "service_x",
                    "template_id": "template_y",
                    "user_id": "public_z",
                    "template_params": {
                        "certificate_pdf": "JVBERi0=",
                        "to_email": "jane@example.com"
                    }
                })))
                .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
                .expect(1)
                .mount(&server)
                .await;

            let client = client_for(&server);
            client.send("service_x", "template_y", &params()).await.unwrap();
        }

        #[tokio::test]
        async fn test_send_maps_rejection() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(
                    ResponseTemplate::new(400).set_body_string("The service ID is invalid"),
                )
                .mount(&server)
                .await;

            let err = client_for(&server)
                .send("service_x", "template_y", &params())
                .await
                .unwrap_err();
            match err {
                RelayError::Rejected { status, body } => {
                    assert_eq!(status, 400);
                    assert_eq!(body, "The service ID is invalid");
                }
                other => panic!("expected rejection, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_long_rejection_body_cut_on_char_boundary() {
            // 511 ASCII bytes then a two-byte char straddling the limit
            let body = format!("{}é{}", "a".repeat(MAX_ERROR_BODY_LEN - 1), "b".repeat(100));
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(422).set_body_string(body))
                .mount(&server)
                .await;

            let err = client_for(&server)
                .send("service_x", "template_y", &params())
                .await
                .unwrap_err();
            match err {
                RelayError::Rejected { status, body } => {
                    assert_eq!(status, 422);
                    assert_eq!(body.len(), MAX_ERROR_BODY_LEN - 1);
                    assert!(body.chars().all(|c| c == 'a'));
                }
                other => panic!("expected rejection, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_server_error_is_rejection() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(503))
                .mount(&server)
                .await;

            let err = client_for(&server)
                .send("service_x", "template_y", &params())
                .await
                .unwrap_err();
            assert!(matches!(err, RelayError::Rejected { status: 503, .. }));
        }
    }

    #[tokio::test]
    async fn test_send_without_credentials_makes_no_request() {
        // Unroutable endpoint: a network attempt would surface as Transport.
        let client = RelayClient::new("http://127.0.0.1:9/send", "", None).unwrap();
        let result = client.send("svc", "tpl", &params()).await;
        assert!(matches!(result, Err(RelayError::NotConfigured(_))));
    }
}
