use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::draft::entities::InvoiceDraft;
use crate::domain::draft::ports::{BackendError, BackendReply, ExportReply, ValidationBackend};
use crate::domain::feedback::reconciler::ResponseBody;
use crate::infrastructure::config::BackendConfig;

/// HTTP adapter for the validation backend. Posts the serialized draft as
/// JSON and hands the status plus the lenient-parsed body to the domain;
/// interpreting the reply is the reconciler's job. No retries.
#[derive(Debug, Clone)]
pub struct HttpValidationBackend {
  client: Client,
  base_url: String,
}

impl HttpValidationBackend {
  pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.request_timeout_seconds))
      .build()
      .map_err(|e| BackendError::Transport(e.to_string()))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
    })
  }

  async fn post_draft(
    &self,
    path: &str,
    query: Option<&[(&str, &str)]>,
    draft: &InvoiceDraft,
  ) -> Result<BackendReply, BackendError> {
    let url = format!("{}{}", self.base_url, path);

    let mut request = self.client.post(&url).json(draft);
    if let Some(query) = query {
      request = request.query(query);
    }

    let response = request
      .send()
      .await
      .map_err(|e| BackendError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let bytes = response
      .bytes()
      .await
      .map_err(|e| BackendError::Transport(e.to_string()))?;

    tracing::debug!(%url, status, size = bytes.len(), "Backend reply");

    Ok(BackendReply {
      status,
      body: ResponseBody::parse(&bytes),
    })
  }
}

#[async_trait]
impl ValidationBackend for HttpValidationBackend {
  async fn validate(&self, draft: &InvoiceDraft) -> Result<BackendReply, BackendError> {
    self.post_draft("/validate", None, draft).await
  }

  async fn export(&self, draft: &InvoiceDraft) -> Result<ExportReply, BackendError> {
    let url = format!("{}/export", self.base_url);

    let response = self
      .client
      .post(&url)
      .json(draft)
      .send()
      .await
      .map_err(|e| BackendError::Transport(e.to_string()))?;

    let status = response.status();
    let bytes = response
      .bytes()
      .await
      .map_err(|e| BackendError::Transport(e.to_string()))?;

    if status.is_success() {
      tracing::debug!(%url, size = bytes.len(), "Export archive received");
      Ok(ExportReply::Archive(bytes.to_vec()))
    } else {
      Ok(ExportReply::Rejected(BackendReply {
        status: status.as_u16(),
        body: ResponseBody::parse(&bytes),
      }))
    }
  }

  async fn export_email(
    &self,
    draft: &InvoiceDraft,
    recipient: &str,
    sender: &str,
  ) -> Result<BackendReply, BackendError> {
    self
      .post_draft(
        "/export_email",
        Some(&[("recipient", recipient), ("sender", sender)]),
        draft,
      )
      .await
  }
}
