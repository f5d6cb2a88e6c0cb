use std::sync::Arc;

use crate::domain::draft::entities::InvoiceDraft;
use crate::domain::draft::ports::{ExportReply, ValidationBackend};
use crate::domain::feedback::entities::FeedbackResult;
use crate::domain::feedback::reconciler::FeedbackReconciler;

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
  /// The backend accepted the draft and returned the archive.
  Archive { filename: String, bytes: Vec<u8> },
  /// The backend rejected the draft; feedback is already reconciled.
  Rejected(FeedbackResult),
}

/// Submit the draft for export. The archive filename is derived from the
/// invoice number; a blank number falls back to a generic name.
pub struct ExportDraftUseCase {
  backend: Arc<dyn ValidationBackend>,
  reconciler: FeedbackReconciler,
}

impl ExportDraftUseCase {
  pub fn new(backend: Arc<dyn ValidationBackend>, reconciler: FeedbackReconciler) -> Self {
    Self {
      backend,
      reconciler,
    }
  }

  pub async fn execute(&self, draft: &InvoiceDraft) -> ExportOutcome {
    match self.backend.export(draft).await {
      Ok(ExportReply::Archive(bytes)) => {
        let filename = archive_filename(&draft.header.number);
        tracing::info!(filename = %filename, size = bytes.len(), "Export archive received");
        ExportOutcome::Archive { filename, bytes }
      }
      Ok(ExportReply::Rejected(reply)) => {
        tracing::debug!(status = reply.status, "Export rejected");
        ExportOutcome::Rejected(self.reconciler.reconcile(reply.status, &reply.body))
      }
      Err(err) => {
        tracing::warn!("Export request failed: {}", err);
        ExportOutcome::Rejected(FeedbackResult::from_transport_failure(err.to_string()))
      }
    }
  }
}

fn archive_filename(number: &str) -> String {
  let stem = number.trim();
  if stem.is_empty() {
    "rechnung.zip".to_string()
  } else {
    format!("{}.zip", stem)
  }
}
