use std::sync::Arc;
use validator::Validate;

use crate::domain::draft::entities::InvoiceDraft;
use crate::domain::draft::ports::ValidationBackend;
use crate::domain::feedback::entities::{FeedbackResult, Severity};
use crate::domain::feedback::reconciler::FeedbackReconciler;

/// Delivery envelope for an export-by-email request.
#[derive(Debug, Clone, Validate)]
pub struct EmailEnvelope {
  #[validate(email(message = "Recipient is not a valid email address"))]
  pub recipient: String,
  #[validate(email(message = "Sender is not a valid email address"))]
  pub sender: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmailOutcome {
  Sent,
  Rejected(FeedbackResult),
}

/// Have the backend export the draft and mail the archive. Addresses are
/// checked locally before any network round trip.
pub struct EmailDraftUseCase {
  backend: Arc<dyn ValidationBackend>,
  reconciler: FeedbackReconciler,
}

impl EmailDraftUseCase {
  pub fn new(backend: Arc<dyn ValidationBackend>, reconciler: FeedbackReconciler) -> Self {
    Self {
      backend,
      reconciler,
    }
  }

  pub async fn execute(&self, draft: &InvoiceDraft, envelope: &EmailEnvelope) -> EmailOutcome {
    if let Err(errors) = envelope.validate() {
      let messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .map(|error| {
          error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid email address".to_string())
        })
        .collect();

      let mut feedback = FeedbackResult::default();
      for message in messages {
        feedback.push_general(Severity::Error, message);
      }
      return EmailOutcome::Rejected(feedback);
    }

    match self
      .backend
      .export_email(draft, &envelope.recipient, &envelope.sender)
      .await
    {
      Ok(reply) if (200..300).contains(&reply.status) => {
        tracing::info!(recipient = %envelope.recipient, "Export mail sent");
        EmailOutcome::Sent
      }
      Ok(reply) => {
        tracing::debug!(status = reply.status, "Export mail rejected");
        EmailOutcome::Rejected(self.reconciler.reconcile(reply.status, &reply.body))
      }
      Err(err) => {
        tracing::warn!("Export mail request failed: {}", err);
        EmailOutcome::Rejected(FeedbackResult::from_transport_failure(err.to_string()))
      }
    }
  }
}
