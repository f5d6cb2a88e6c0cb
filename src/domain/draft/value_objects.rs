use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid tax code: {0}")]
  InvalidTaxCode(String),
  #[error("Invalid unit code: {0}")]
  InvalidUnitCode(String),
  #[error("Invalid draft mode: {0}")]
  InvalidMode(String),
}

/// Round a monetary amount to 2 fraction digits, half away from zero.
///
/// Every per-line step is rounded with this rule before summation, so the
/// totals of a draft match what the backend reproduces line by line.
pub fn round2(value: Decimal) -> Decimal {
  value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Draft Mode - B2B by default, B2G requires a buyer routing reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftMode {
  #[default]
  B2B,
  B2G,
}

impl DraftMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      DraftMode::B2B => "B2B",
      DraftMode::B2G => "B2G",
    }
  }

  /// Whether the buyer routing reference (Leitweg-ID) field is shown.
  pub fn requires_buyer_reference(&self) -> bool {
    matches!(self, DraftMode::B2G)
  }
}

impl FromStr for DraftMode {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "B2B" => Ok(DraftMode::B2B),
      "B2G" => Ok(DraftMode::B2G),
      _ => Err(ValueObjectError::InvalidMode(s.to_string())),
    }
  }
}

impl fmt::Display for DraftMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Unit Code - UN/ECE Recommendation 20 subset used by the line editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitCode {
  DAY,
  HUR,
  C62,
}

impl UnitCode {
  pub fn as_str(&self) -> &'static str {
    match self {
      UnitCode::DAY => "DAY",
      UnitCode::HUR => "HUR",
      UnitCode::C62 => "C62",
    }
  }
}

impl FromStr for UnitCode {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "DAY" => Ok(UnitCode::DAY),
      "HUR" => Ok(UnitCode::HUR),
      "C62" => Ok(UnitCode::C62),
      _ => Err(ValueObjectError::InvalidUnitCode(s.to_string())),
    }
  }
}

// Tax Category - only S (standard rated) ever contributes tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxCategory {
  S,
  E,
}

impl TaxCategory {
  pub fn as_str(&self) -> &'static str {
    match self {
      TaxCategory::S => "S",
      TaxCategory::E => "E",
    }
  }
}

// Line VAT - category/rate pair resolved from a combined selector value.
// The selector table is static: "S-19", "S-7", "E-0". The two halves are
// never edited independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineVat {
  pub category: TaxCategory,
  pub rate: Decimal,
}

impl LineVat {
  pub fn new(category: TaxCategory, rate: Decimal) -> Self {
    Self { category, rate }
  }

  /// The rate the totals engine actually applies. Any category other than
  /// S contributes zero tax regardless of the stored rate.
  pub fn effective_rate(&self) -> Decimal {
    match self.category {
      TaxCategory::S => self.rate,
      _ => Decimal::ZERO,
    }
  }
}

impl FromStr for LineVat {
  type Err = ValueObjectError;

  // Callers are contracted to pass values from the static selector table,
  // so malformed input is a programmer error - no silent default.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (category, rate) = s
      .split_once('-')
      .ok_or_else(|| ValueObjectError::InvalidTaxCode(s.to_string()))?;

    let category = match category.trim() {
      "S" => TaxCategory::S,
      "E" => TaxCategory::E,
      _ => return Err(ValueObjectError::InvalidTaxCode(s.to_string())),
    };

    let rate = Decimal::from_str(rate.trim())
      .map_err(|_| ValueObjectError::InvalidTaxCode(s.to_string()))?;

    Ok(Self { category, rate })
  }
}

impl fmt::Display for LineVat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.category.as_str(), self.rate)
  }
}
