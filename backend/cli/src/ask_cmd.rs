use std::path::PathBuf;

use anyhow::{Context, Result};
use phyassist_client::{render_page, FeedbackClient, FeedbackForm, FormState, SelectedFile};
use phyassist_config::{log_report, validate_client, ClientConfig};
use phyassist_logging::init_logger;
use phyassist_markdown::{MathMlTypesetter, Renderer, SegmentParser};

use crate::terminal_output;

/// Runs the feedback form once from the command line.
pub async fn run(
    question: String,
    image: PathBuf,
    api_url: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(url) = api_url {
        config.api_base_url = Some(url.trim_end_matches('/').to_string());
    }
    init_logger(&config.logging, "phyassist-client.log");
    log_report(&validate_client(&config));

    let client = FeedbackClient::from_config(&config)?;
    let mut form = FeedbackForm::new(client);
    form.set_question(question);
    form.select_file(SelectedFile::from_path(&image)?);

    let state = form.submit().await.clone();

    if let Some(path) = out {
        let page = render_page(form.question(), &state, &MathMlTypesetter::new());
        tokio::fs::write(&path, page)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }

    match state {
        FormState::Success { feedback } => {
            let text = Renderer::to_plain_text(&SegmentParser::parse(&feedback));
            terminal_output::print_feedback(&text);
            Ok(())
        }
        FormState::Failed { error } => {
            terminal_output::print_error(&error);
            std::process::exit(1);
        }
        other => anyhow::bail!("submission ended in unexpected state {other:?}"),
    }
}
