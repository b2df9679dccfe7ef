use std::path::PathBuf;

use anyhow::{Context, Result};

use phyassist_markdown::render_html;

/// Renders a feedback text file to an HTML fragment.
pub async fn run(input: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let text = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;
    let html = render_html(&text);

    match out {
        Some(path) => tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{html}");
            Ok(())
        }
    }
}
