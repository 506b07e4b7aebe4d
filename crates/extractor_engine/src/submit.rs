use std::sync::OnceLock;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};

use crate::{ClientConfig, ImageUpload, SubmitError, SubmitFailureKind, SubmitReply};

/// Multipart field name the decoding service reads the image from.
pub const IMAGE_FIELD: &str = "image";

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// Uploads the image and returns the raw reply, whatever its status.
    async fn submit(&self, upload: &ImageUpload) -> Result<SubmitReply, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    config: ClientConfig,
    client: OnceLock<reqwest::Client>,
}

impl ReqwestSubmitter {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared client, built on first use so a build failure surfaces as a
    /// submission error rather than at construction.
    fn client(&self) -> Result<&reqwest::Client, SubmitError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let built = self.build_client()?;
        Ok(self.client.get_or_init(|| built))
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.config.connect_timeout);
        if let Some(timeout) = self.config.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| SubmitError::new(SubmitFailureKind::Network, err.to_string()))
    }

    fn build_form(&self, upload: &ImageUpload) -> Result<Form, SubmitError> {
        let mut part = Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
        if !upload.media_type.trim().is_empty() {
            part = part.mime_str(&upload.media_type).map_err(|err| {
                SubmitError::new(SubmitFailureKind::InvalidRequest, err.to_string())
            })?;
        }
        Ok(Form::new().part(IMAGE_FIELD, part))
    }

    fn too_large(&self, actual: u64) -> SubmitError {
        SubmitError::new(
            SubmitFailureKind::ResponseTooLarge {
                max_bytes: self.config.max_response_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, upload: &ImageUpload) -> Result<SubmitReply, SubmitError> {
        let client = self.client()?;
        let form = self.build_form(upload)?;

        let response = client
            .post(self.config.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Non-2xx replies are passed through; their body still carries the error text.
        let status = response.status().as_u16();

        if let Some(content_len) = response.content_length() {
            if content_len > self.config.max_response_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.config.max_response_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(SubmitReply { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(SubmitFailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return SubmitError::new(SubmitFailureKind::InvalidRequest, err.to_string());
    }
    SubmitError::new(SubmitFailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_built_once_and_reused() {
        let submitter = ReqwestSubmitter::new(ClientConfig::new("http://localhost:5000").unwrap());

        let first = submitter.client().unwrap() as *const reqwest::Client;
        let second = submitter.client().unwrap() as *const reqwest::Client;

        assert!(std::ptr::eq(first, second));
    }
}
