use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{DraftMode, LineVat, UnitCode, round2};

// Address - ISO-2 country code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub city: String,
  pub postcode: String,
  pub country_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub person: Option<String>,
  pub phone: Option<String>,
  pub email: Option<String>,
}

impl Contact {
  pub fn is_empty(&self) -> bool {
    self.person.is_none() && self.phone.is_none() && self.email.is_none()
  }
}

// Party - seller or buyer. The routing reference (Leitweg-ID) is only ever
// set on the buyer; the seller keeps None.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
  pub name: String,
  pub vat_id: Option<String>,
  pub address: Address,
  pub contact: Option<Contact>,
  pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
  pub number: String,
  pub issue_date: String,
  pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
  pub means_code: String,
  pub iban: String,
  pub remittance: String,
}

// Line Item - id is the 1-based position at normalization time, re-derived
// on every payload build. A removed-then-readded line gets a new id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
  pub id: String,
  pub name: String,
  pub qty: Decimal,
  pub unit_code: UnitCode,
  pub net_unit_price: Decimal,
  pub vat: LineVat,
}

impl LineItem {
  /// Net amount of this line, rounded per the monetary rounding rule.
  pub fn net(&self) -> Decimal {
    round2(self.qty * self.net_unit_price)
  }

  /// Tax amount of this line, computed on the already-rounded net.
  pub fn tax(&self) -> Decimal {
    round2(self.net() * self.vat.effective_rate() / Decimal::ONE_HUNDRED)
  }
}

// Invoice Draft - root aggregate. A value object rebuilt on every edit;
// it has no persistent identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
  pub mode: DraftMode,
  pub header: Header,
  pub seller: Party,
  pub buyer: Party,
  pub payment: Payment,
  pub lines: Vec<LineItem>,
}

// Draft Totals - derived, recomputed on every change, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTotals {
  pub net: Decimal,
  pub tax: Decimal,
  pub gross: Decimal,
}

impl DraftTotals {
  /// Sum the per-line amounts in sequence order. Each line is rounded
  /// before summation; summing pre-rounded values can differ from rounding
  /// the sum, and the former is what the backend reproduces.
  pub fn calculate(draft: &InvoiceDraft) -> Self {
    let mut net = Decimal::ZERO;
    let mut tax = Decimal::ZERO;

    for line in &draft.lines {
      net += line.net();
      tax += line.tax();
    }

    Self {
      net,
      tax,
      gross: round2(net + tax),
    }
  }
}
