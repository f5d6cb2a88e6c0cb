use async_trait::async_trait;
use thiserror::Error;

use super::entities::InvoiceDraft;
use crate::domain::feedback::reconciler::ResponseBody;

#[derive(Debug, Clone, Error)]
pub enum BackendError {
  #[error("Backend request failed: {0}")]
  Transport(String),
}

/// Transport-level reply: HTTP status plus the lenient-parsed body.
/// Interpreting the body is the reconciler's job, not the adapter's.
#[derive(Debug, Clone)]
pub struct BackendReply {
  pub status: u16,
  pub body: ResponseBody,
}

/// A successful export carries the archive bytes; anything else carries
/// the reply for reconciliation.
#[derive(Debug, Clone)]
pub enum ExportReply {
  Archive(Vec<u8>),
  Rejected(BackendReply),
}

#[async_trait]
pub trait ValidationBackend: Send + Sync {
  async fn validate(&self, draft: &InvoiceDraft) -> Result<BackendReply, BackendError>;

  async fn export(&self, draft: &InvoiceDraft) -> Result<ExportReply, BackendError>;

  async fn export_email(
    &self,
    draft: &InvoiceDraft,
    recipient: &str,
    sender: &str,
  ) -> Result<BackendReply, BackendError>;
}
