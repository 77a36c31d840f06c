use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod chat;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the web UI server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Start an interactive note and chat session
    Chat {
        /// Note file to load into the session
        #[arg(long)]
        note: Option<PathBuf>,
    },
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
            serve::run(host, port).await;
        }
        Some(Command::Chat { note }) => {
            chat::run(note).await?;
        }
        None => {
            chat::run(None).await?;
        }
    }

    Ok(())
}
