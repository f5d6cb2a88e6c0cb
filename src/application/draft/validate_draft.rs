use std::sync::Arc;

use crate::domain::draft::entities::InvoiceDraft;
use crate::domain::draft::ports::ValidationBackend;
use crate::domain::feedback::entities::FeedbackResult;
use crate::domain::feedback::reconciler::FeedbackReconciler;

/// Submit the draft for validation and reconcile the reply. Transport
/// failures degrade to a general-error result; this use case never fails
/// once the draft is built.
pub struct ValidateDraftUseCase {
  backend: Arc<dyn ValidationBackend>,
  reconciler: FeedbackReconciler,
}

impl ValidateDraftUseCase {
  pub fn new(backend: Arc<dyn ValidationBackend>, reconciler: FeedbackReconciler) -> Self {
    Self {
      backend,
      reconciler,
    }
  }

  pub async fn execute(&self, draft: &InvoiceDraft) -> FeedbackResult {
    match self.backend.validate(draft).await {
      Ok(reply) => {
        tracing::debug!(status = reply.status, "Validation reply received");
        self.reconciler.reconcile(reply.status, &reply.body)
      }
      Err(err) => {
        tracing::warn!("Validation request failed: {}", err);
        FeedbackResult::from_transport_failure(err.to_string())
      }
    }
  }
}
