use rust_decimal::Decimal;

use crate::domain::draft::entities::DraftTotals;
use crate::domain::draft::value_objects::round2;
use crate::domain::feedback::entities::FeedbackResult;

/// Format an amount the way the invoice itself will show it: de-DE
/// grouping with a trailing euro sign, e.g. `1.234,56 €`.
pub fn format_eur(amount: Decimal) -> String {
  let rounded = round2(amount);
  let sign = if rounded.is_sign_negative() { "-" } else { "" };
  let fixed = format!("{:.2}", rounded.abs());
  let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

  let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
  for (i, ch) in int_part.chars().rev().enumerate() {
    if i > 0 && i % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(ch);
  }
  let int_grouped: String = grouped.chars().rev().collect();

  format!("{}{},{} €", sign, int_grouped, frac_part)
}

pub fn render_totals(totals: &DraftTotals) -> String {
  format!(
    "Netto {} • USt {} • Brutto {}",
    format_eur(totals.net),
    format_eur(totals.tax),
    format_eur(totals.gross)
  )
}

/// Plain-text rendering of a reconciled result: field annotations first
/// (keyed by locator path), then the unmapped messages, errors before
/// warnings.
pub fn render_feedback(feedback: &FeedbackResult) -> String {
  if feedback.is_clean() {
    return "Valide.".to_string();
  }

  let mut out = String::new();

  if !feedback.field_errors.is_empty() || !feedback.general_errors.is_empty() {
    out.push_str("Fehler\n");
    for (locator, message) in &feedback.field_errors {
      out.push_str(&format!("  [{}] {}\n", locator, message));
    }
    for message in &feedback.general_errors {
      out.push_str(&format!("  - {}\n", message));
    }
  }

  if !feedback.field_warnings.is_empty() || !feedback.general_warnings.is_empty() {
    out.push_str("Hinweise\n");
    for (locator, message) in &feedback.field_warnings {
      out.push_str(&format!("  [{}] {}\n", locator, message));
    }
    for message in &feedback.general_warnings {
      out.push_str(&format!("  - {}\n", message));
    }
  }

  out
}
