pub mod entities;
pub mod locators;
pub mod reconciler;

pub use entities::{FeedbackResult, Severity};
pub use locators::FieldLocator;
pub use reconciler::{
  DetailEntry, DetailPayload, FeedbackReconciler, PathSegment, ReconcilerOptions, ResponseBody,
};
