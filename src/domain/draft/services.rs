use super::entities::{DraftTotals, InvoiceDraft};
use super::normalizer::{BuildOptions, DraftInput, build_draft};
use super::value_objects::{DraftMode, ValueObjectError};
use crate::domain::feedback::entities::FeedbackResult;
use crate::domain::feedback::reconciler::{FeedbackReconciler, ResponseBody};

/// Flags consumed by the presentation layer; the core never renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
  pub show_buyer_reference: bool,
}

/// Result of re-normalizing the editor state after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPreview {
  pub draft: InvoiceDraft,
  pub totals: DraftTotals,
}

/// Holds the current mode and the single current feedback store. The raw
/// editor state stays with the presentation layer; the session only reads
/// snapshots of it.
#[derive(Debug, Clone)]
pub struct DraftSession {
  mode: DraftMode,
  build_options: BuildOptions,
  reconciler: FeedbackReconciler,
  feedback: FeedbackResult,
}

impl DraftSession {
  pub fn new(build_options: BuildOptions, reconciler: FeedbackReconciler) -> Self {
    Self {
      mode: DraftMode::default(),
      build_options,
      reconciler,
      feedback: FeedbackResult::default(),
    }
  }

  pub fn mode(&self) -> DraftMode {
    self.mode
  }

  /// Two states, freely reversible, no side effects beyond the visibility
  /// flags.
  pub fn set_mode(&mut self, mode: DraftMode) {
    self.mode = mode;
  }

  pub fn field_visibility(&self) -> FieldVisibility {
    FieldVisibility {
      show_buyer_reference: self.mode.requires_buyer_reference(),
    }
  }

  /// Rebuild the payload and recompute totals. Pure and cheap; safe to
  /// call on every keystroke.
  pub fn draft_changed(&self, input: &DraftInput) -> Result<DraftPreview, ValueObjectError> {
    let draft = build_draft(input, self.mode, &self.build_options)?;
    let totals = DraftTotals::calculate(&draft);
    Ok(DraftPreview { draft, totals })
  }

  /// Reconcile a backend reply into a fresh result and replace the stored
  /// one wholesale. Annotations never accumulate across attempts.
  pub fn backend_response(&mut self, status: u16, body: &ResponseBody) -> &FeedbackResult {
    let feedback = self.reconciler.reconcile(status, body);
    self.apply_feedback(feedback)
  }

  /// Replace the stored feedback. Applying the same result twice leaves
  /// the store exactly as applying it once.
  pub fn apply_feedback(&mut self, feedback: FeedbackResult) -> &FeedbackResult {
    self.feedback = feedback;
    &self.feedback
  }

  pub fn feedback(&self) -> &FeedbackResult {
    &self.feedback
  }
}
