use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xbill::{
  adapters::cli::{render_feedback, render_totals},
  application::draft::{
    EmailDraftUseCase, EmailEnvelope, EmailOutcome, ExportDraftUseCase, ExportOutcome,
    PreviewTotalsUseCase, ValidateDraftUseCase,
  },
  domain::draft::{BuildOptions, DraftInput, DraftMode, DraftSession},
  domain::feedback::{FeedbackReconciler, ReconcilerOptions},
  infrastructure::{config::Config, http::HttpValidationBackend},
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
  B2b,
  B2g,
}

impl From<ModeArg> for DraftMode {
  fn from(mode: ModeArg) -> Self {
    match mode {
      ModeArg::B2b => DraftMode::B2B,
      ModeArg::B2g => DraftMode::B2G,
    }
  }
}

impl std::fmt::Display for ModeArg {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ModeArg::B2b => write!(f, "b2b"),
      ModeArg::B2g => write!(f, "b2g"),
    }
  }
}

#[derive(Parser, Debug)]
#[command(name = "xbill", version, about = "E-invoice draft workbench")]
struct Cli {
  /// Draft input file as raw field values (defaults to stdin)
  #[arg(short = 'i', long = "input")]
  input: Option<PathBuf>,

  /// Draft mode; B2G makes the buyer routing reference mandatory
  #[arg(long, value_enum, default_value_t = ModeArg::B2b)]
  mode: ModeArg,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Rebuild the payload and print the totals
  Totals,
  /// Submit the draft for validation and print the reconciled feedback
  Validate,
  /// Export the draft and write the archive
  Export {
    /// Output file (defaults to the number-derived archive name)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
  },
  /// Export the draft and have the backend send it by email
  Email {
    #[arg(long)]
    recipient: String,
    #[arg(long)]
    sender: String,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "xbill=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let cli = Cli::parse();

  let config =
    Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

  let input = read_input(cli.input.as_deref())?;

  let reconciler = FeedbackReconciler::new(ReconcilerOptions {
    include_mapped_in_general: config.draft.include_mapped_in_general,
  });
  let mut session = DraftSession::new(
    BuildOptions {
      fill_placeholders: config.draft.fill_placeholders,
    },
    reconciler,
  );
  session.set_mode(cli.mode.into());

  let preview = PreviewTotalsUseCase.execute(&session, &input)?;
  println!("{}", render_totals(&preview.totals));

  match cli.command {
    Command::Totals => {}
    Command::Validate => {
      let backend = Arc::new(HttpValidationBackend::new(&config.backend)?);
      let use_case = ValidateDraftUseCase::new(backend, reconciler);

      let feedback = session.apply_feedback(use_case.execute(&preview.draft).await);
      println!("{}", render_feedback(feedback));
      if feedback.has_blocking_errors() {
        std::process::exit(1);
      }
    }
    Command::Export { output } => {
      let backend = Arc::new(HttpValidationBackend::new(&config.backend)?);
      let use_case = ExportDraftUseCase::new(backend, reconciler);

      match use_case.execute(&preview.draft).await {
        ExportOutcome::Archive { filename, bytes } => {
          let target = output.unwrap_or_else(|| PathBuf::from(&filename));
          std::fs::write(&target, &bytes)?;
          println!("Archiv geschrieben: {}", target.display());
        }
        ExportOutcome::Rejected(feedback) => {
          println!("{}", render_feedback(session.apply_feedback(feedback)));
          std::process::exit(1);
        }
      }
    }
    Command::Email { recipient, sender } => {
      let backend = Arc::new(HttpValidationBackend::new(&config.backend)?);
      let use_case = EmailDraftUseCase::new(backend, reconciler);
      let envelope = EmailEnvelope { recipient, sender };

      match use_case.execute(&preview.draft, &envelope).await {
        EmailOutcome::Sent => println!("Mail verschickt."),
        EmailOutcome::Rejected(feedback) => {
          println!("{}", render_feedback(session.apply_feedback(feedback)));
          std::process::exit(1);
        }
      }
    }
  }

  Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<DraftInput> {
  let text = match path {
    Some(path) => std::fs::read_to_string(path)?,
    None => {
      let mut buffer = String::new();
      std::io::stdin().read_to_string(&mut buffer)?;
      buffer
    }
  };

  if text.trim().is_empty() {
    return Ok(DraftInput::default());
  }

  serde_json::from_str(&text).map_err(|e| anyhow::anyhow!("Invalid draft input: {}", e))
}
