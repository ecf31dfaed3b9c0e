use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod render;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Start an interactive assessment session against a running server
    Chat {
        /// Chat proxy endpoint
        #[arg(long, default_value = "http://127.0.0.1:2222/api/chat")]
        url: String,

        /// Model requested for each turn
        #[arg(long, default_value = crate::chat::DEFAULT_MODEL)]
        model: String,

        /// Write an SVG for every assessed style to this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Render every style marker found in a reply to SVG files
    Render {
        /// File holding the reply text, `-` for stdin
        #[arg(long)]
        input: PathBuf,

        /// Directory to write the SVG files to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
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
            serve::run(host, port).await?;
        }
        Some(Command::Chat {
            url,
            model,
            out_dir,
        }) => {
            chat::run(&url, &model, out_dir).await?;
        }
        Some(Command::Render { input, out_dir }) => {
            render::run(&input, &out_dir).await?;
        }
        None => {}
    }

    Ok(())
}
