use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::entities::{Address, Contact, Header, InvoiceDraft, LineItem, Party, Payment};
use super::value_objects::{DraftMode, LineVat, UnitCode, ValueObjectError};

/// Raw field values for one line row, exactly as the editor holds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub qty: String,
  #[serde(default)]
  pub unit_code: String,
  #[serde(default)]
  pub net_unit_price: String,
  /// Combined category/rate selector value, e.g. "S-19".
  #[serde(default)]
  pub vat_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHeader {
  #[serde(default)]
  pub number: String,
  #[serde(default)]
  pub issue_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSeller {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub vat_id: String,
  #[serde(default)]
  pub city: String,
  #[serde(default)]
  pub postcode: String,
  #[serde(default)]
  pub country_code: String,
  #[serde(default)]
  pub contact_person: String,
  #[serde(default)]
  pub contact_phone: String,
  #[serde(default)]
  pub contact_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBuyer {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub city: String,
  #[serde(default)]
  pub postcode: String,
  #[serde(default)]
  pub country_code: String,
  /// Leitweg-ID; semantically required in B2G, enforced by the backend.
  #[serde(default)]
  pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPayment {
  #[serde(default)]
  pub means_code: String,
  #[serde(default)]
  pub iban: String,
  #[serde(default)]
  pub remittance: String,
}

/// Snapshot of the full editor state. Owned by the presentation layer;
/// the core only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInput {
  #[serde(default)]
  pub header: RawHeader,
  #[serde(default)]
  pub seller: RawSeller,
  #[serde(default)]
  pub buyer: RawBuyer,
  #[serde(default)]
  pub payment: RawPayment,
  #[serde(default)]
  pub lines: Vec<RawLine>,
}

/// Deployments disagree on what a blank field should become: the demo
/// variant substitutes non-empty placeholders, the strict variant passes
/// empty strings through and lets the backend complain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
  pub fill_placeholders: bool,
}

impl LineItem {
  /// Normalize one raw row into a typed line. Quantity and price are
  /// lenient (a draft is work in progress, not a final document); the
  /// unit and tax selectors only ever carry table values, so anything
  /// else is a programmer error.
  pub fn normalize(raw: &RawLine, position: usize) -> Result<LineItem, ValueObjectError> {
    let name = if raw.name.trim().is_empty() {
      format!("Pos {}", position)
    } else {
      raw.name.clone()
    };

    Ok(LineItem {
      id: position.to_string(),
      name,
      qty: lenient_decimal(&raw.qty),
      unit_code: UnitCode::from_str(&raw.unit_code)?,
      net_unit_price: lenient_decimal(&raw.net_unit_price),
      vat: LineVat::from_str(&raw.vat_code)?,
    })
  }
}

/// Assemble the full draft from raw editor state. Pure: no network or
/// storage access. Lines are numbered by their current array position,
/// so ids are always "1".."N" with no gaps after rows were removed or
/// reordered.
pub fn build_draft(
  input: &DraftInput,
  mode: DraftMode,
  options: &BuildOptions,
) -> Result<InvoiceDraft, ValueObjectError> {
  let lines = input
    .lines
    .iter()
    .enumerate()
    .map(|(i, raw)| LineItem::normalize(raw, i + 1))
    .collect::<Result<Vec<_>, _>>()?;

  let fill = options.fill_placeholders;

  let seller_contact = Contact {
    person: optional(&input.seller.contact_person, fill.then_some("Jan Presche")),
    phone: optional(&input.seller.contact_phone, fill.then_some("+49 123")),
    email: optional(&input.seller.contact_email, fill.then_some("hi@example.com")),
  };

  Ok(InvoiceDraft {
    mode,
    header: Header {
      number: defaulted(&input.header.number, fill.then_some("2025-001")),
      issue_date: defaulted(&input.header.issue_date, fill.then(today_iso).as_deref()),
      currency: "EUR".to_string(),
    },
    seller: Party {
      name: defaulted(&input.seller.name, fill.then_some("Studio Presche")),
      vat_id: optional(&input.seller.vat_id, None),
      address: Address {
        city: defaulted(&input.seller.city, fill.then_some("Augsburg")),
        postcode: defaulted(&input.seller.postcode, fill.then_some("86150")),
        country_code: defaulted(&input.seller.country_code, fill.then_some("DE")),
      },
      contact: (!seller_contact.is_empty()).then_some(seller_contact),
      reference: None,
    },
    buyer: Party {
      name: defaulted(&input.buyer.name, fill.then_some("Muster GmbH")),
      vat_id: None,
      address: Address {
        city: defaulted(&input.buyer.city, fill.then_some("München")),
        postcode: defaulted(&input.buyer.postcode, fill.then_some("80331")),
        country_code: defaulted(&input.buyer.country_code, fill.then_some("DE")),
      },
      contact: None,
      reference: optional(&input.buyer.reference, None),
    },
    payment: Payment {
      // The payment means code is not user-editable; blank always maps to
      // 30 (credit transfer).
      means_code: defaulted(&input.payment.means_code, Some("30")),
      iban: defaulted(
        &input.payment.iban,
        fill.then_some("DE89370400440532013000"),
      ),
      remittance: defaulted(&input.payment.remittance, fill.then_some("Re 2025-001")),
    },
    lines,
  })
}

/// Parse a decimal out of free text; empty or unparseable input becomes 0.
fn lenient_decimal(raw: &str) -> Decimal {
  Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

fn defaulted(raw: &str, placeholder: Option<&str>) -> String {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    placeholder.unwrap_or_default().to_string()
  } else {
    raw.to_string()
  }
}

fn optional(raw: &str, placeholder: Option<&str>) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    placeholder.map(str::to_string)
  } else {
    Some(raw.to_string())
  }
}

fn today_iso() -> String {
  chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::draft::value_objects::TaxCategory;
  use rust_decimal_macros::dec;

  fn raw_line(name: &str, qty: &str, price: &str) -> RawLine {
    RawLine {
      name: name.to_string(),
      qty: qty.to_string(),
      unit_code: "DAY".to_string(),
      net_unit_price: price.to_string(),
      vat_code: "S-19".to_string(),
    }
  }

  #[test]
  fn test_normalize_line() {
    let line = LineItem::normalize(&raw_line("UX Workshop", "1", "1200"), 1).unwrap();
    assert_eq!(line.id, "1");
    assert_eq!(line.name, "UX Workshop");
    assert_eq!(line.qty, dec!(1));
    assert_eq!(line.unit_code, UnitCode::DAY);
    assert_eq!(line.net_unit_price, dec!(1200));
    assert_eq!(line.vat.category, TaxCategory::S);
  }

  #[test]
  fn test_blank_name_gets_position_placeholder() {
    let line = LineItem::normalize(&raw_line("  ", "1", "0"), 3).unwrap();
    assert_eq!(line.name, "Pos 3");
  }

  #[test]
  fn test_unparseable_numbers_become_zero() {
    let line = LineItem::normalize(&raw_line("A", "abc", ""), 1).unwrap();
    assert_eq!(line.qty, dec!(0));
    assert_eq!(line.net_unit_price, dec!(0));
  }

  #[test]
  fn test_negative_input_is_kept() {
    let line = LineItem::normalize(&raw_line("A", "-2", "9.50"), 1).unwrap();
    assert_eq!(line.qty, dec!(-2));
  }

  #[test]
  fn test_bad_tax_selector_propagates() {
    let mut raw = raw_line("A", "1", "1");
    raw.vat_code = "S_19".to_string();
    assert!(LineItem::normalize(&raw, 1).is_err());
  }

  #[test]
  fn test_ids_are_rederived_from_position() {
    // Three rows, then the middle one removed: remaining rows are
    // renumbered "1", "2" in their new order.
    let mut input = DraftInput {
      lines: vec![
        raw_line("eins", "1", "10"),
        raw_line("zwei", "1", "20"),
        raw_line("drei", "1", "30"),
      ],
      ..DraftInput::default()
    };
    input.lines.remove(1);

    let draft = build_draft(&input, DraftMode::B2B, &BuildOptions::default()).unwrap();
    let ids: Vec<_> = draft.lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(draft.lines[1].name, "drei");
  }

  #[test]
  fn test_strict_build_keeps_blanks_empty() {
    let input = DraftInput::default();
    let draft = build_draft(&input, DraftMode::B2B, &BuildOptions::default()).unwrap();

    assert_eq!(draft.header.number, "");
    assert_eq!(draft.header.issue_date, "");
    assert_eq!(draft.seller.name, "");
    assert_eq!(draft.seller.vat_id, None);
    assert_eq!(draft.seller.contact, None);
    assert_eq!(draft.buyer.reference, None);
    assert_eq!(draft.payment.iban, "");
    // The means code is a constant, not a demo placeholder.
    assert_eq!(draft.payment.means_code, "30");
    assert!(draft.lines.is_empty());
  }

  #[test]
  fn test_placeholder_build_fills_demo_values() {
    let input = DraftInput::default();
    let options = BuildOptions {
      fill_placeholders: true,
    };
    let draft = build_draft(&input, DraftMode::B2B, &options).unwrap();

    assert_eq!(draft.header.number, "2025-001");
    assert!(!draft.header.issue_date.is_empty());
    assert_eq!(draft.seller.name, "Studio Presche");
    assert_eq!(draft.seller.address.city, "Augsburg");
    assert_eq!(
      draft.seller.contact.as_ref().unwrap().email.as_deref(),
      Some("hi@example.com")
    );
    assert_eq!(draft.buyer.name, "Muster GmbH");
    assert_eq!(draft.payment.iban, "DE89370400440532013000");
    // vat_id and the routing reference never get placeholders.
    assert_eq!(draft.seller.vat_id, None);
    assert_eq!(draft.buyer.reference, None);
  }

  #[test]
  fn test_entered_values_win_over_placeholders() {
    let input = DraftInput {
      header: RawHeader {
        number: "RE-77".to_string(),
        issue_date: "2025-05-01".to_string(),
      },
      buyer: RawBuyer {
        reference: "991-01234-67".to_string(),
        ..RawBuyer::default()
      },
      ..DraftInput::default()
    };
    let options = BuildOptions {
      fill_placeholders: true,
    };
    let draft = build_draft(&input, DraftMode::B2G, &options).unwrap();

    assert_eq!(draft.mode, DraftMode::B2G);
    assert_eq!(draft.header.number, "RE-77");
    assert_eq!(draft.header.issue_date, "2025-05-01");
    assert_eq!(draft.buyer.reference.as_deref(), Some("991-01234-67"));
  }
}
