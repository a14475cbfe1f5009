//! LibreTranslate HTTP provider.
//!
//! Sends one form-encoded `POST {base_url}/translate` per call and reads
//! `translatedText` from the JSON reply. No API key is required for
//! self-hosted instances; the public one accepts an optional `api_key`.
//! Docs: <https://libretranslate.com/docs>

use async_trait::async_trait;
use polyglot_core::{error::TranslateError, message::TranslationRequest, traits::Translator};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Total budget for one translation call, connect to last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Translator backed by a LibreTranslate-compatible server.
pub struct LibreTranslateProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl LibreTranslateProvider {
    /// Create from config values.
    pub fn from_config(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

// --- Serde types ---

#[derive(Serialize)]
struct TranslateForm<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

fn classify(e: reqwest::Error) -> TranslateError {
    if e.is_timeout() {
        TranslateError::Timeout
    } else {
        TranslateError::Network(e.to_string())
    }
}

/// Pull `translatedText` out of a response body.
fn parse_body(body: &str) -> Result<String, TranslateError> {
    let parsed: TranslateResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::Decode(e.to_string()))?;
    parsed.translated_text.ok_or(TranslateError::MissingField)
}

#[async_trait]
impl Translator for LibreTranslateProvider {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let url = self.endpoint("translate");
        let form = TranslateForm {
            q: &request.q,
            source: &request.source,
            target: &request.target,
            format: &request.format,
            api_key: self.api_key.as_deref(),
        };

        debug!(
            "libretranslate: POST {url} target={} chars={}",
            request.target,
            request.q.chars().count()
        );

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .form(&form)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(classify)?;
        parse_body(&body)
    }

    async fn is_available(&self) -> bool {
        let url = self.endpoint("languages");
        match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("libretranslate not available: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request(text: &str, target: &str) -> TranslationRequest {
        TranslationRequest::auto(text, target)
    }

    #[test]
    fn test_provider_name_and_endpoint() {
        let p = LibreTranslateProvider::from_config("http://localhost:5000/".into(), None);
        assert_eq!(p.name(), "libretranslate");
        assert_eq!(p.endpoint("translate"), "http://localhost:5000/translate");
        assert_eq!(p.timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn test_form_omits_empty_api_key() {
        let form = TranslateForm {
            q: "Hello",
            source: "auto",
            target: "es",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["q"], "Hello");
        assert_eq!(json["source"], "auto");
        assert!(json.get("api_key").is_none());
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(
            parse_body(r#"{"translatedText":"Hola","detectedLanguage":{"language":"en"}}"#)
                .unwrap(),
            "Hola"
        );
        assert!(matches!(
            parse_body(r#"{"error":"nope"}"#),
            Err(TranslateError::MissingField)
        ));
        assert!(matches!(
            parse_body("<html>bad gateway</html>"),
            Err(TranslateError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_translate_success_sends_form_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/translate")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Hello there".into()),
                Matcher::UrlEncoded("source".into(), "auto".into()),
                Matcher::UrlEncoded("target".into(), "es".into()),
                Matcher::UrlEncoded("format".into(), "text".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"translatedText":"Hola"}"#)
            .create_async()
            .await;

        let p = LibreTranslateProvider::from_config(server.url(), None);
        let out = p.translate(&request("Hello there", "es")).await.unwrap();
        assert_eq!(out, "Hola");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_translate_sends_api_key_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/translate")
            .match_body(Matcher::UrlEncoded("api_key".into(), "k-123".into()))
            .with_status(200)
            .with_body(r#"{"translatedText":"Bonjour"}"#)
            .create_async()
            .await;

        let p = LibreTranslateProvider::from_config(server.url(), Some("k-123".into()));
        let out = p.translate(&request("Hello", "fr")).await.unwrap();
        assert_eq!(out, "Bonjour");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_translate_non_200_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/translate")
            .with_status(500)
            .with_body(r#"{"translatedText":"ignored"}"#)
            .create_async()
            .await;

        let p = LibreTranslateProvider::from_config(server.url(), None);
        let err = p.translate(&request("Hello", "de")).await.unwrap_err();
        assert!(matches!(err, TranslateError::Status(500)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_translate_missing_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/translate")
            .with_status(200)
            .with_body(r#"{"detectedLanguage":{"language":"en"}}"#)
            .create_async()
            .await;

        let p = LibreTranslateProvider::from_config(server.url(), None);
        let err = p.translate(&request("Hello", "de")).await.unwrap_err();
        assert!(matches!(err, TranslateError::MissingField), "got {err:?}");
    }

    #[tokio::test]
    async fn test_translate_timeout() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hold = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((sock, _)) = listener.accept().await {
                held.push(sock);
            }
        });

        let p = LibreTranslateProvider::from_config(format!("http://{addr}"), None)
            .with_timeout(Duration::from_millis(200));
        let err = p.translate(&request("Hallo", "de")).await.unwrap_err();
        assert!(err.is_timeout(), "got {err:?}");
        hold.abort();
    }

    #[tokio::test]
    async fn test_translate_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let p = LibreTranslateProvider::from_config(format!("http://{addr}"), None)
            .with_timeout(Duration::from_secs(2));
        let err = p.translate(&request("Hello", "fi")).await.unwrap_err();
        assert!(matches!(err, TranslateError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_is_available_probes_languages() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/languages")
            .with_status(200)
            .with_body(r#"[{"code":"en","name":"English"}]"#)
            .create_async()
            .await;

        let p = LibreTranslateProvider::from_config(server.url(), None);
        assert!(p.is_available().await);
    }
}
