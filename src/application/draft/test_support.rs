use async_trait::async_trait;

use crate::domain::draft::entities::InvoiceDraft;
use crate::domain::draft::normalizer::{BuildOptions, DraftInput, RawLine, build_draft};
use crate::domain::draft::ports::{BackendError, BackendReply, ExportReply, ValidationBackend};
use crate::domain::draft::value_objects::DraftMode;
use crate::domain::feedback::reconciler::ResponseBody;

/// Canned backend for use-case tests.
pub struct StubBackend {
  reply: Option<(u16, serde_json::Value)>,
  archive: Option<Vec<u8>>,
  failure: Option<String>,
}

impl StubBackend {
  pub fn replying(status: u16, body: serde_json::Value) -> Self {
    Self {
      reply: Some((status, body)),
      archive: None,
      failure: None,
    }
  }

  pub fn archiving(bytes: Vec<u8>) -> Self {
    Self {
      reply: None,
      archive: Some(bytes),
      failure: None,
    }
  }

  pub fn failing(message: &str) -> Self {
    Self {
      reply: None,
      archive: None,
      failure: Some(message.to_string()),
    }
  }

  fn reply(&self) -> Result<BackendReply, BackendError> {
    if let Some(message) = &self.failure {
      return Err(BackendError::Transport(message.clone()));
    }
    let (status, body) = self.reply.clone().expect("stub configured with a reply");
    Ok(BackendReply {
      status,
      body: serde_json::from_value::<ResponseBody>(body).expect("stub body parses"),
    })
  }
}

#[async_trait]
impl ValidationBackend for StubBackend {
  async fn validate(&self, _draft: &InvoiceDraft) -> Result<BackendReply, BackendError> {
    self.reply()
  }

  async fn export(&self, _draft: &InvoiceDraft) -> Result<ExportReply, BackendError> {
    if let Some(bytes) = &self.archive {
      return Ok(ExportReply::Archive(bytes.clone()));
    }
    Ok(ExportReply::Rejected(self.reply()?))
  }

  async fn export_email(
    &self,
    _draft: &InvoiceDraft,
    _recipient: &str,
    _sender: &str,
  ) -> Result<BackendReply, BackendError> {
    self.reply()
  }
}

pub fn sample_draft() -> InvoiceDraft {
  let input = DraftInput {
    lines: vec![RawLine {
      name: "UX Workshop".to_string(),
      qty: "1".to_string(),
      unit_code: "DAY".to_string(),
      net_unit_price: "1200".to_string(),
      vat_code: "S-19".to_string(),
    }],
    ..DraftInput::default()
  };
  build_draft(
    &input,
    DraftMode::B2B,
    &BuildOptions {
      fill_placeholders: true,
    },
  )
  .expect("sample draft builds")
}
