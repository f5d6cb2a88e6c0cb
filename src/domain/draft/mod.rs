pub mod entities;
pub mod errors;
pub mod normalizer;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Address, Contact, DraftTotals, Header, InvoiceDraft, LineItem, Party, Payment};
pub use errors::DraftError;
pub use normalizer::{
  BuildOptions, DraftInput, RawBuyer, RawHeader, RawLine, RawPayment, RawSeller, build_draft,
};
pub use ports::{BackendError, BackendReply, ExportReply, ValidationBackend};
pub use services::{DraftPreview, DraftSession, FieldVisibility};
pub use value_objects::{DraftMode, LineVat, TaxCategory, UnitCode, ValueObjectError, round2};
