//! HTTP client for the conversion service's root endpoint
//!
//! A [`ConversionClient`] owns a loaded [`ConversionConfig`] and sends one
//! POST per conversion. The source text travels in a [`ConversionRequest`]
//! built for that call only, so nothing of a document outlives its request.

mod content_type;

pub use content_type::ContentType;

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use std::io::Read;
use std::time::Duration;

/// Body of a single request: every set option plus the document text
#[derive(Debug, Serialize)]
pub struct ConversionRequest<'a> {
    #[serde(flatten)]
    pub config: &'a ConversionConfig,
    pub text: String,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(config: &'a ConversionConfig, text: impl Into<String>) -> Self {
        Self {
            config,
            text: text.into(),
        }
    }

    /// Encode the request body
    pub fn to_json(&self) -> Result<Vec<u8>, ConvertError> {
        serde_json::to_vec(self).map_err(ConvertError::Serialize)
    }
}

/// Client for a conversion service on localhost
#[derive(Debug)]
pub struct ConversionClient {
    config: ConversionConfig,
    agent: ureq::Agent,
}

impl ConversionClient {
    /// Create a client without a request timeout
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(config: ConversionConfig, timeout: Duration) -> Self {
        Self {
            config,
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConversionConfig {
        &mut self.config
    }

    /// Read `input` and convert it through the service.
    ///
    /// `content_type` only decides how the source is read; the request itself
    /// is always JSON.
    pub fn convert<R: Read>(&self, input: R, content_type: &str) -> Result<Vec<u8>, ConvertError> {
        self.convert_with(&self.config, input, content_type)
    }

    /// Like [`convert`](Self::convert), sending the options of `config` instead
    /// of the client's own.
    pub fn convert_with<R: Read>(
        &self,
        config: &ConversionConfig,
        mut input: R,
        content_type: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        let content_type: ContentType = content_type.parse()?;

        let mut src = Vec::new();
        input.read_to_end(&mut src).map_err(ConvertError::Read)?;

        let text = if content_type.is_binary() {
            BASE64.encode(&src)
        } else {
            String::from_utf8_lossy(&src).into_owned()
        };

        self.root_endpoint(&ConversionRequest::new(config, text))
    }

    /// POST `request` to the root endpoint and return the converted bytes
    pub fn root_endpoint(&self, request: &ConversionRequest<'_>) -> Result<Vec<u8>, ConvertError> {
        if request.text.is_empty() {
            return Err(ConvertError::NothingToConvert);
        }
        let body = request.to_json()?;
        let url = request.config.endpoint();

        let response = match self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_bytes(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = error_body(&url, response.into_string());
                tracing::debug!(%url, status, "conversion service rejected request");
                return Err(ConvertError::Status { url, status, body });
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::debug!(%url, error = %transport, "POST failed");
                return Err(ConvertError::Transport {
                    url,
                    source: Box::new(transport),
                });
            }
        };

        let mut src = Vec::new();
        if let Err(source) = response.into_reader().read_to_end(&mut src) {
            tracing::debug!(%url, error = %source, "POST read body failed");
            return Err(ConvertError::ResponseRead { url, source });
        }
        if src.is_empty() {
            tracing::debug!(%url, "zero bytes returned from root endpoint");
            return Err(ConvertError::EmptyResponse { url });
        }
        if request.config.verbose {
            tracing::info!(bytes = src.len(), "returned successfully from root endpoint");
        }
        Ok(src)
    }
}

const UNREADABLE_BODY: &str = "<unreadable body>";

/// Message carried by a rejected request, or a placeholder when it cannot be read
fn error_body(url: &str, body: std::io::Result<String>) -> String {
    match body {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(%url, error = %err, "failed to read error response body");
            UNREADABLE_BODY.to_string()
        }
    }
}
