//! Generate a career-transition roadmap and print it to the console.
//!
//! Reads the provider token from the `HF_TOKEN` environment variable (a
//! `.env` file next to the binary works too).
//!
//! # Examples
//!
//! ```sh
//! # Defaults: .Net developer -> ML Engineer in 1 month
//! gapmap
//!
//! # Custom transition
//! gapmap --current-role "barista" --target-role "SRE" --time-period "6 months"
//! ```

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use gapmap::error::RoadmapError;
use gapmap::schema::Roadmap;
use gapmap::{ChatRequest, InferenceClient, Message};

/// Generate a career-transition roadmap and print it to the console.
///
/// Reads the provider token from the HF_TOKEN environment variable.
#[derive(Parser)]
#[command(name = "gapmap")]
struct Cli {
    /// The role you are transitioning from
    #[arg(long, default_value = ".Net developer")]
    current_role: String,

    /// The role you are transitioning to
    #[arg(long, default_value = "ML Engineer")]
    target_role: String,

    /// Time available for the transition
    #[arg(long, default_value = "1 month")]
    time_period: String,

    /// Model to use for the completion
    #[arg(long, default_value = gapmap::DEFAULT_MODEL)]
    model: String,

    /// Maximum tokens in the response
    #[arg(long, default_value_t = gapmap::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(long, default_value_t = gapmap::DEFAULT_TEMPERATURE)]
    temperature: f32,
}

async fn generate_roadmap(cli: &Cli) -> Result<Roadmap, RoadmapError> {
    let token = std::env::var("HF_TOKEN")
        .map_err(|_| RoadmapError::Transport("HF_TOKEN environment variable is not set".into()))?;

    let client = InferenceClient::new(token)?;

    let prompt = gapmap::prompt::build_prompt(&cli.current_role, &cli.target_role, &cli.time_period);
    let body = ChatRequest {
        model: cli.model.clone(),
        messages: vec![Message::user(prompt)],
        max_tokens: cli.max_tokens,
        temperature: cli.temperature,
    };

    let completion = client.chat(&body).await?;
    let raw = completion.content.ok_or(RoadmapError::EmptyCompletion)?;

    gapmap::roadmap_from_completion(&raw)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match generate_roadmap(&cli).await {
        Ok(roadmap) => print!("{}", gapmap::report::render(&roadmap)),
        Err(e) => {
            let summary = match e {
                RoadmapError::Validation(_) => "Data validation failed.",
                _ => "Inference request failed.",
            };
            eprintln!("CRITICAL ERROR: {summary}");
            eprintln!("DETAILS: {e}");
            process::exit(1);
        }
    }
}
