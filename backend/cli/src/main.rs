mod ask_cmd;
mod render_cmd;
mod serve_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "phyassist")]
#[command(about = "PhyAssist: step-by-step feedback on handwritten H2 Physics solutions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feedback service
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Submit one question and solution image to the feedback service
    Ask {
        /// The physics question being answered
        #[arg(short, long)]
        question: String,
        /// PNG or JPEG photo of the handwritten solution
        #[arg(short, long)]
        image: PathBuf,
        /// Feedback service base URL (overrides PHYASSIST_API_URL)
        #[arg(long)]
        api_url: Option<String>,
        /// Also write the result as an HTML page
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Render a feedback text file with math to HTML
    Render {
        #[arg(short, long)]
        input: PathBuf,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(path) = phyassist_config::load_dotenv() {
        eprintln!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => serve_cmd::run(port).await,
        Commands::Ask {
            question,
            image,
            api_url,
            out,
        } => ask_cmd::run(question, image, api_url, out).await,
        Commands::Render { input, out } => render_cmd::run(input, out).await,
    }
}
