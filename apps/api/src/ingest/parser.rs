//! Resume Parser: the boundary to the external "parse resumes" service.
//!
//! Ingestion only depends on the `ResumeParser` trait. `AppState` carries an
//! `Arc<dyn ResumeParser>` chosen at startup:
//! - `HttpResumeParser` when `PARSER_URL` is configured
//! - `FixtureResumeParser` (seeded, deterministic) otherwise

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::candidate::ParsedResume;

const PARSE_PATH: &str = "/api/parse";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parse service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("could not decode parse service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("parse service rejected a resume: {0}")]
    Rejected(String),
}

/// One uploaded resume, passed through untouched. Decoding PDF/DOCX is the
/// parse service's job.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[async_trait]
pub trait ResumeParser: Send + Sync {
    /// Returns one record per file, in upload order.
    async fn parse(
        &self,
        files: &[UploadedFile],
        job_description: Option<&str>,
    ) -> Result<Vec<ParsedResume>, ParserError>;

    /// Backend label for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// HttpResumeParser
// ────────────────────────────────────────────────────────────────────────────

/// Forwards uploads to `{base_url}/api/parse` as multipart `file` parts plus an
/// optional `jobDescription` field. Retries on 429 and 5xx with backoff.
#[derive(Clone)]
pub struct HttpResumeParser {
    client: Client,
    base_url: String,
}

impl HttpResumeParser {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ParserError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PARSE_PATH)
    }
}

fn build_form(files: &[UploadedFile], job_description: Option<&str>) -> Result<Form, ParserError> {
    let mut form = Form::new();
    for file in files {
        let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(ct) = &file.content_type {
            part = part.mime_str(ct)?;
        }
        form = form.part("file", part);
    }
    if let Some(jd) = job_description {
        form = form.text("jobDescription", jd.to_string());
    }
    Ok(form)
}

#[async_trait]
impl ResumeParser for HttpResumeParser {
    async fn parse(
        &self,
        files: &[UploadedFile],
        job_description: Option<&str>,
    ) -> Result<Vec<ParsedResume>, ParserError> {
        let url = self.endpoint();
        let mut last_error: Option<ParserError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Parse call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .multipart(build_form(files, job_description)?)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ParserError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 || status.is_server_error() {
                warn!("Parse service returned {}: {}", status, body);
                last_error = Some(ParserError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                return Err(ParserError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            let records = decode_records(&body)?;
            debug!(
                "Parse service returned {} records for {} files",
                records.len(),
                files.len()
            );
            return Ok(records);
        }

        Err(last_error.unwrap_or(ParserError::Api {
            status: 503,
            message: format!("no response after {MAX_RETRIES} attempts"),
        }))
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}

/// The service reports failures as `{"error": "..."}`, both for the whole
/// request and per record.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

/// Decodes a record array, failing on the first record that carries an error.
pub(crate) fn decode_records(body: &str) -> Result<Vec<ParsedResume>, ParserError> {
    let records: Vec<ParsedResume> = serde_json::from_str(body)?;
    if let Some(err) = records.iter().find_map(|r| r.error.as_ref()) {
        return Err(ParserError::Rejected(err.clone()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_records() {
        let body = r#"[{
            "name": "Emily Johnson",
            "skills": ["React"],
            "matchScore": 81,
            "fileName": "a.pdf"
        }]"#;
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].match_score, Some(81));
        assert_eq!(records[0].file_name, "a.pdf");
    }

    #[test]
    fn test_decode_records_rejects_error_record() {
        let body =
            r#"[{"name": "ok"}, {"error": "Failed to parse AI response", "fileName": "b.pdf"}]"#;
        match decode_records(body) {
            Err(ParserError::Rejected(msg)) => assert_eq!(msg, "Failed to parse AI response"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_records_not_an_array() {
        assert!(matches!(
            decode_records(r#"{"error": "No file provided"}"#),
            Err(ParserError::Decode(_))
        ));
    }

    #[test]
    fn test_error_message_prefers_error_key() {
        assert_eq!(error_message(r#"{"error": "No file provided"}"#), "No file provided");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let parser = HttpResumeParser::new("http://localhost:5000/").unwrap();
        assert_eq!(parser.endpoint(), "http://localhost:5000/api/parse");
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let files = vec![UploadedFile {
            file_name: "a.pdf".to_string(),
            content_type: Some("not a mime".to_string()),
            bytes: Bytes::from_static(b"%PDF"),
        }];
        assert!(build_form(&files, None).is_err());
        let ok = vec![UploadedFile {
            content_type: Some("application/pdf".to_string()),
            ..files[0].clone()
        }];
        assert!(build_form(&ok, Some("Rust engineer")).is_ok());
    }
}
