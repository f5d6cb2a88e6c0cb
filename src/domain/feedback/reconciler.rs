use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::fmt;

use super::entities::{FeedbackResult, Severity};
use super::locators::FieldLocator;

lazy_static! {
  // Bare messages without a path prefix still get mapped when they
  // recognizably complain about the IBAN.
  static ref IBAN_TOKEN: Regex = Regex::new(r"(?i)\biban\b").expect("valid IBAN token pattern");
}

/// The two known backend reply shapes, plus a catch-all for everything
/// the reconciler has to degrade gracefully on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
  /// Structured shape (typically 422): location/message records under a
  /// `detail` key, or a plain `detail` string.
  Structured { detail: DetailPayload },
  /// Flat shape (typically 400; 200 replies carry warnings only). Both
  /// lists default to empty so a bare success body parses here too.
  Flat {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
  },
  /// Anything else the backend or a proxy produced.
  Other(serde_json::Value),
}

impl ResponseBody {
  /// Lenient parse: an unreadable body is reconciled as `Other`, never
  /// an error.
  pub fn parse(bytes: &[u8]) -> ResponseBody {
    serde_json::from_slice(bytes).unwrap_or(ResponseBody::Other(serde_json::Value::Null))
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DetailPayload {
  Message(String),
  Entries(Vec<DetailEntry>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DetailEntry {
  Located { loc: Vec<PathSegment>, msg: String },
  Message(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
  Key(String),
  Index(i64),
}

impl fmt::Display for PathSegment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PathSegment::Key(key) => write!(f, "{}", key),
      PathSegment::Index(index) => write!(f, "{}", index),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilerOptions {
  /// Deployments disagree on whether a mapped error string is also
  /// appended to the general list or routed exclusively to its field.
  /// Both behaviors are preserved behind this flag; additive is the
  /// default.
  pub include_mapped_in_general: bool,
}

impl Default for ReconcilerOptions {
  fn default() -> Self {
    Self {
      include_mapped_in_general: true,
    }
  }
}

/// Maps a backend reply onto the field-addressable feedback model. Never
/// fails: unrecognized shapes degrade to a general error instead of
/// crashing the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackReconciler {
  options: ReconcilerOptions,
}

impl FeedbackReconciler {
  pub fn new(options: ReconcilerOptions) -> Self {
    Self { options }
  }

  /// Produce a fresh result for one reply. Calling this twice with the
  /// same input yields structurally equal results; the caller replaces
  /// its previous result instead of merging.
  pub fn reconcile(&self, status: u16, body: &ResponseBody) -> FeedbackResult {
    let mut result = FeedbackResult::default();

    if !known_status(status) {
      result.push_general(Severity::Error, fallback_message(status, body));
      return result;
    }

    match body {
      ResponseBody::Flat { errors, warnings } => {
        for raw in errors {
          self.route_flat(&mut result, raw, Severity::Error);
        }
        for raw in warnings {
          self.route_flat(&mut result, raw, Severity::Warning);
        }
      }
      ResponseBody::Structured { detail } => match detail {
        DetailPayload::Message(message) => {
          result.push_general(Severity::Error, message.clone());
        }
        DetailPayload::Entries(entries) => {
          for entry in entries {
            match entry {
              DetailEntry::Located { loc, msg } => self.route_located(&mut result, loc, msg),
              DetailEntry::Message(message) => {
                self.route_flat(&mut result, message, Severity::Error)
              }
            }
          }
        }
      },
      ResponseBody::Other(_) => {
        // A success reply with an unreadable body has nothing to report;
        // an error reply must still surface.
        if !(200..300).contains(&status) {
          result.push_general(Severity::Error, format!("HTTP {}", status));
        }
      }
    }

    result
  }

  /// Flat entries are either "<path>: <message>" or a bare message.
  fn route_flat(&self, result: &mut FeedbackResult, raw: &str, severity: Severity) {
    if let Some((path, message)) = raw.split_once(':') {
      if let Some(locator) = FieldLocator::from_path(path.trim()) {
        result.annotate(locator, severity, message.trim());
        if self.options.include_mapped_in_general {
          result.push_general(severity, raw);
        }
      } else {
        // A path we do not know; surface verbatim rather than dropping.
        result.push_general(severity, raw);
      }
      return;
    }

    if IBAN_TOKEN.is_match(raw) {
      result.annotate(FieldLocator::PaymentIban, severity, raw);
      if self.options.include_mapped_in_general {
        result.push_general(severity, raw);
      }
    } else {
      result.push_general(severity, raw);
    }
  }

  /// Structured entries carry the path as segments. The leading segment
  /// is the envelope discriminator, not a field.
  fn route_located(&self, result: &mut FeedbackResult, loc: &[PathSegment], msg: &str) {
    let path = loc
      .iter()
      .skip(1)
      .map(|segment| segment.to_string())
      .collect::<Vec<_>>()
      .join(".");

    if let Some(locator) = FieldLocator::from_path(&path) {
      result.annotate(locator, Severity::Error, msg);
      if self.options.include_mapped_in_general {
        result.push_general(Severity::Error, format!("{}: {}", path, msg));
      }
    } else if path.is_empty() {
      result.push_general(Severity::Error, msg);
    } else {
      result.push_general(Severity::Error, format!("{}: {}", path, msg));
    }
  }
}

fn known_status(status: u16) -> bool {
  matches!(status, 200..=299 | 400 | 422)
}

fn fallback_message(status: u16, body: &ResponseBody) -> String {
  match body {
    ResponseBody::Structured {
      detail: DetailPayload::Message(message),
    } => message.clone(),
    _ => format!("HTTP {}", status),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn body(value: serde_json::Value) -> ResponseBody {
    serde_json::from_value(value).expect("test body parses")
  }

  fn reconciler() -> FeedbackReconciler {
    FeedbackReconciler::default()
  }

  fn exclusive_reconciler() -> FeedbackReconciler {
    FeedbackReconciler::new(ReconcilerOptions {
      include_mapped_in_general: false,
    })
  }

  #[test]
  fn test_flat_error_with_known_path_annotates_the_field() {
    let result = reconciler().reconcile(
      400,
      &body(json!({"errors": ["payment.iban: IBAN invalid"], "warnings": []})),
    );

    assert_eq!(
      result.field_errors.get(&FieldLocator::PaymentIban).unwrap(),
      "IBAN invalid"
    );
    // Mapped entries also land in the general list by default.
    assert_eq!(result.general_errors, vec!["payment.iban: IBAN invalid"]);
  }

  #[test]
  fn test_exclusive_routing_skips_the_general_list_for_mapped_entries() {
    let result = exclusive_reconciler().reconcile(
      400,
      &body(json!({"errors": ["payment.iban: IBAN invalid", "something else broke"]})),
    );

    assert_eq!(
      result.field_errors.get(&FieldLocator::PaymentIban).unwrap(),
      "IBAN invalid"
    );
    // Unmapped entries are always surfaced.
    assert_eq!(result.general_errors, vec!["something else broke"]);
  }

  #[test]
  fn test_flat_error_with_unknown_path_stays_general_verbatim() {
    let raw = "lines[1].vat: Bei steuerfrei muss der Satz 0% sein.";
    let result = reconciler().reconcile(400, &body(json!({"errors": [raw]})));

    assert!(result.field_errors.is_empty());
    assert_eq!(result.general_errors, vec![raw]);
  }

  #[test]
  fn test_bare_iban_message_maps_through_the_token_heuristic() {
    let raw = "Die angegebene IBAN ist ungültig";
    let result = reconciler().reconcile(400, &body(json!({"errors": [raw]})));

    assert_eq!(
      result.field_errors.get(&FieldLocator::PaymentIban).unwrap(),
      raw
    );
  }

  #[test]
  fn test_bare_message_without_token_stays_general() {
    let result = reconciler().reconcile(400, &body(json!({"errors": ["kaputt"]})));
    assert!(result.field_errors.is_empty());
    assert_eq!(result.general_errors, vec!["kaputt"]);
  }

  #[test]
  fn test_warnings_route_with_non_blocking_severity() {
    let result = reconciler().reconcile(
      200,
      &body(json!({"warnings": ["buyer.reference: Leitweg-ID fehlt", "prüfen Sie das Datum"]})),
    );

    assert!(result.field_errors.is_empty());
    assert!(!result.has_blocking_errors());
    assert_eq!(
      result
        .field_warnings
        .get(&FieldLocator::BuyerReference)
        .unwrap(),
      "Leitweg-ID fehlt"
    );
    assert_eq!(
      result.general_warnings,
      vec![
        "buyer.reference: Leitweg-ID fehlt",
        "prüfen Sie das Datum"
      ]
    );
  }

  #[test]
  fn test_plain_success_body_reconciles_to_an_empty_result() {
    let result = reconciler().reconcile(200, &body(json!({"valid": true})));
    assert!(result.is_clean());
  }

  #[test]
  fn test_structured_entry_with_known_location() {
    let result = reconciler().reconcile(
      422,
      &body(json!({"detail": [{"loc": ["body", "header", "number"], "msg": "required"}]})),
    );

    assert_eq!(
      result.field_errors.get(&FieldLocator::HeaderNumber).unwrap(),
      "required"
    );
  }

  #[test]
  fn test_structured_entry_with_unknown_location_formats_joined_path() {
    let result = reconciler().reconcile(
      422,
      &body(json!({"detail": [{"loc": ["body", "lines", 0, "qty"], "msg": "value is not a valid float"}]})),
    );

    assert!(result.field_errors.is_empty());
    assert_eq!(
      result.general_errors,
      vec!["lines.0.qty: value is not a valid float"]
    );
  }

  #[test]
  fn test_structured_detail_string_list_routes_like_flat_errors() {
    // /export rejects with the flat validation strings wrapped in detail.
    let result = reconciler().reconcile(
      400,
      &body(json!({"detail": ["payment.iban: IBAN sieht nicht korrekt aus"]})),
    );

    assert_eq!(
      result.field_errors.get(&FieldLocator::PaymentIban).unwrap(),
      "IBAN sieht nicht korrekt aus"
    );
  }

  #[test]
  fn test_structured_plain_detail_string_becomes_general() {
    let result = reconciler().reconcile(422, &body(json!({"detail": "payload too large"})));
    assert_eq!(result.general_errors, vec!["payload too large"]);
    assert!(result.field_errors.is_empty());
  }

  #[test]
  fn test_unknown_status_degrades_to_single_general_error() {
    let result = reconciler().reconcile(503, &body(json!({"whatever": 1})));
    assert_eq!(result.general_errors, vec!["HTTP 503"]);
    assert!(result.field_errors.is_empty());
  }

  #[test]
  fn test_unknown_status_prefers_the_detail_message() {
    let result = reconciler().reconcile(500, &body(json!({"detail": "mail relay down"})));
    assert_eq!(result.general_errors, vec!["mail relay down"]);
  }

  #[test]
  fn test_malformed_body_on_error_status_still_surfaces() {
    let result = reconciler().reconcile(400, &ResponseBody::parse(b"<html>bad gateway</html>"));
    assert_eq!(result.general_errors, vec!["HTTP 400"]);
  }

  #[test]
  fn test_malformed_body_on_success_status_is_quiet() {
    let result = reconciler().reconcile(200, &ResponseBody::parse(b"not json"));
    assert!(result.is_clean());
  }

  #[test]
  fn test_reconcile_is_idempotent() {
    let body = body(json!({
      "errors": ["payment.iban: IBAN invalid", "kaputt"],
      "warnings": ["buyer.reference: Leitweg-ID fehlt"]
    }));

    let first = reconciler().reconcile(400, &body);
    let second = reconciler().reconcile(400, &body);
    assert_eq!(first, second);
  }

  #[test]
  fn test_repeated_entries_for_one_field_keep_the_last_message() {
    let result = reconciler().reconcile(
      400,
      &body(json!({"errors": ["header.number: required", "header.number: must match pattern"]})),
    );

    assert_eq!(
      result.field_errors.get(&FieldLocator::HeaderNumber).unwrap(),
      "must match pattern"
    );
    // Both raw strings stay visible in the general list.
    assert_eq!(result.general_errors.len(), 2);
  }

  #[test]
  fn test_general_order_follows_the_response_order() {
    let result = reconciler().reconcile(
      400,
      &body(json!({"errors": ["erstens", "zweitens", "drittens"]})),
    );
    assert_eq!(result.general_errors, vec!["erstens", "zweitens", "drittens"]);
  }
}
