pub mod email_draft;
pub mod export_draft;
pub mod preview_totals;
pub mod validate_draft;

#[cfg(test)]
pub mod test_support;

pub use email_draft::{EmailDraftUseCase, EmailEnvelope, EmailOutcome};
pub use export_draft::{ExportDraftUseCase, ExportOutcome};
pub use preview_totals::PreviewTotalsUseCase;
pub use validate_draft::ValidateDraftUseCase;
