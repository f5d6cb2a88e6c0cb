use serde::Serialize;
use std::collections::BTreeMap;

use super::locators::FieldLocator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Error,
  Warning,
}

/// Reconciled feedback for one submission attempt. One instance per
/// attempt; callers replace the previous instance wholesale instead of
/// merging into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackResult {
  /// At most one error annotation per field; a later entry for the same
  /// locator overwrites the earlier one within a single pass.
  pub field_errors: BTreeMap<FieldLocator, String>,
  /// Independent of errors: a field can carry both an error and a warning.
  pub field_warnings: BTreeMap<FieldLocator, String>,
  /// Unmapped messages in backend response order.
  pub general_errors: Vec<String>,
  pub general_warnings: Vec<String>,
}

impl FeedbackResult {
  pub fn annotate(
    &mut self,
    locator: FieldLocator,
    severity: Severity,
    message: impl Into<String>,
  ) {
    let store = match severity {
      Severity::Error => &mut self.field_errors,
      Severity::Warning => &mut self.field_warnings,
    };
    store.insert(locator, message.into());
  }

  pub fn push_general(&mut self, severity: Severity, message: impl Into<String>) {
    let list = match severity {
      Severity::Error => &mut self.general_errors,
      Severity::Warning => &mut self.general_warnings,
    };
    list.push(message.into());
  }

  /// A single general error with no field mapping, for transport and
  /// other failures the backend never got to annotate.
  pub fn from_transport_failure(message: impl Into<String>) -> Self {
    let mut result = Self::default();
    result.push_general(Severity::Error, message);
    result
  }

  pub fn has_blocking_errors(&self) -> bool {
    !self.field_errors.is_empty() || !self.general_errors.is_empty()
  }

  pub fn is_clean(&self) -> bool {
    !self.has_blocking_errors()
      && self.field_warnings.is_empty()
      && self.general_warnings.is_empty()
  }
}
