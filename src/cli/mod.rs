use anyhow::Result;
use clap::{Parser, Subcommand};

mod chat;
mod models;
mod prompt;
mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the web UI and API server
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Chat with the character in the terminal
    Chat {
        /// Model to use instead of the configured default
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the system prompt built from the saved profiles
    Prompt {},
    /// List the models offered by the completion service
    Models {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat { model }) => {
            chat::run(model).await?;
        }
        Some(Command::Prompt {}) => {
            prompt::run().await?;
        }
        Some(Command::Models {}) => {
            models::run().await;
        }
        None => {}
    }

    Ok(())
}
