use std::path::PathBuf;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::render::{describe, write_svg};
use crate::chat::{ControllerSettings, HttpChatClient, Message, Session};
use crate::core::{AppConfig, logging};
use crate::prompt::system_prompt;
use crate::render::{StyleMatrix, assessed_summary};

const HELP: &str = "Commands: /new starts over, /styles lists assessed styles, Ctrl-D quits.";

fn print_message(msg: &Message) {
    println!("\n{}\n", msg.text);
    for result in msg.results.iter() {
        println!("{}\n", describe(result));
    }
}

pub async fn run(url: &str, model: &str, out_dir: Option<PathBuf>) -> Result<()> {
    // Keep the prompt readable, only problems are logged
    logging::init(&format!("{}=warn", env!("CARGO_CRATE_NAME")));

    let mut rl = DefaultEditor::new()?;

    let mut settings = ControllerSettings::new(&system_prompt()?);
    settings.model = model.to_string();
    let client = HttpChatClient::new(url);
    let mut session = Session::new(client, settings);

    let config = AppConfig::default();
    let mut matrix = StyleMatrix::new(&config.static_dir);
    let mut rendered = 0;

    println!("Kinetic Style Explorer\n{}", HELP);
    println!("...");
    if let Some(msg) = session.start().await {
        print_message(msg);
    }

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match line.trim() {
                    "/new" => {
                        session.reset();
                        println!("...");
                        if let Some(msg) = session.start().await {
                            print_message(msg);
                        }
                    }
                    "/styles" => {
                        let chips = assessed_summary(session.assessed_styles());
                        if chips.is_empty() {
                            println!("No styles assessed yet");
                        }
                        for chip in chips {
                            println!("{} ({})", chip.style, chip.framework);
                        }
                    }
                    text => {
                        if text.is_empty() {
                            continue;
                        }
                        println!("...");
                        let Some(msg) = session.send(text).await else {
                            continue;
                        };
                        print_message(msg);

                        if let Some(dir) = &out_dir {
                            for result in msg.results.iter() {
                                rendered += 1;
                                match write_svg(&mut matrix, result, dir, rendered).await {
                                    Ok(path) => println!("Saved {}", path.display()),
                                    Err(e) => tracing::error!("Failed to save style matrix: {}", e),
                                }
                            }
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
