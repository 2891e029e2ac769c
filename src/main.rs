use anyhow::Result;
use clap::{Parser, Subcommand};
use dojo::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dojo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported languages and their topic progressions
    Languages,
    /// Show cached progress per language
    Progress,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dojo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Languages) => {
            for language in dojo::curriculum::supported_languages() {
                println!("{}", language);
                if let Some(graph) = dojo::curriculum::graph_for(language) {
                    for topic in &graph.topics {
                        println!("  {}. {}", topic.level, topic.name);
                    }
                }
            }
        }
        Some(Commands::Progress) => {
            let progress = dojo::progress::Progress::load()?;
            for language in dojo::curriculum::supported_languages() {
                let Some(graph) = dojo::curriculum::graph_for(language) else {
                    continue;
                };
                let completed = progress
                    .language(language)
                    .map(|p| p.completed_count())
                    .unwrap_or(0);
                println!("{}: {}/{} topics completed", language, completed, graph.len());
            }
        }
        None => {
            // Launch TUI
            let config = Config::load()?;
            let mut app = App::new(config)?;
            app.run().await?;
        }
    }

    Ok(())
}
