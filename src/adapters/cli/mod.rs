pub mod report;

pub use report::{format_eur, render_feedback, render_totals};
