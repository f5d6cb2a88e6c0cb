use serde::Serialize;
use std::fmt;

/// Stable identifier for one editable field, independent of how the
/// backend spells the path to it. Paths outside this table are reported
/// as general feedback, never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLocator {
  HeaderNumber,
  HeaderIssueDate,
  SellerName,
  SellerCity,
  SellerPostcode,
  SellerCountryCode,
  SellerContactEmail,
  BuyerName,
  BuyerCity,
  BuyerPostcode,
  BuyerCountryCode,
  BuyerReference,
  PaymentIban,
}

impl FieldLocator {
  pub const ALL: [FieldLocator; 13] = [
    FieldLocator::HeaderNumber,
    FieldLocator::HeaderIssueDate,
    FieldLocator::SellerName,
    FieldLocator::SellerCity,
    FieldLocator::SellerPostcode,
    FieldLocator::SellerCountryCode,
    FieldLocator::SellerContactEmail,
    FieldLocator::BuyerName,
    FieldLocator::BuyerCity,
    FieldLocator::BuyerPostcode,
    FieldLocator::BuyerCountryCode,
    FieldLocator::BuyerReference,
    FieldLocator::PaymentIban,
  ];

  /// Look up a backend path (segments joined by `.`).
  pub fn from_path(path: &str) -> Option<FieldLocator> {
    match path {
      "header.number" => Some(FieldLocator::HeaderNumber),
      "header.issue_date" => Some(FieldLocator::HeaderIssueDate),
      "seller.name" => Some(FieldLocator::SellerName),
      "seller.address.city" => Some(FieldLocator::SellerCity),
      "seller.address.postcode" => Some(FieldLocator::SellerPostcode),
      "seller.address.country_code" => Some(FieldLocator::SellerCountryCode),
      "seller.contact.email" => Some(FieldLocator::SellerContactEmail),
      "buyer.name" => Some(FieldLocator::BuyerName),
      "buyer.address.city" => Some(FieldLocator::BuyerCity),
      "buyer.address.postcode" => Some(FieldLocator::BuyerPostcode),
      "buyer.address.country_code" => Some(FieldLocator::BuyerCountryCode),
      "buyer.reference" => Some(FieldLocator::BuyerReference),
      "payment.iban" => Some(FieldLocator::PaymentIban),
      _ => None,
    }
  }

  pub fn path(&self) -> &'static str {
    match self {
      FieldLocator::HeaderNumber => "header.number",
      FieldLocator::HeaderIssueDate => "header.issue_date",
      FieldLocator::SellerName => "seller.name",
      FieldLocator::SellerCity => "seller.address.city",
      FieldLocator::SellerPostcode => "seller.address.postcode",
      FieldLocator::SellerCountryCode => "seller.address.country_code",
      FieldLocator::SellerContactEmail => "seller.contact.email",
      FieldLocator::BuyerName => "buyer.name",
      FieldLocator::BuyerCity => "buyer.address.city",
      FieldLocator::BuyerPostcode => "buyer.address.postcode",
      FieldLocator::BuyerCountryCode => "buyer.address.country_code",
      FieldLocator::BuyerReference => "buyer.reference",
      FieldLocator::PaymentIban => "payment.iban",
    }
  }
}

impl fmt::Display for FieldLocator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path())
  }
}
