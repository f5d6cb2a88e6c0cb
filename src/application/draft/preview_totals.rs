use crate::domain::draft::normalizer::DraftInput;
use crate::domain::draft::services::{DraftPreview, DraftSession};
use crate::domain::draft::value_objects::ValueObjectError;

/// The every-keystroke path: rebuild the payload and recompute totals.
pub struct PreviewTotalsUseCase;

impl PreviewTotalsUseCase {
  pub fn execute(
    &self,
    session: &DraftSession,
    input: &DraftInput,
  ) -> Result<DraftPreview, ValueObjectError> {
    session.draft_changed(input)
  }
}
