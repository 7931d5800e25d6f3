use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::Conversation;
use crate::core::{AppConfig, logging};
use crate::openai::{CompletionOptions, OpenAiClient};
use crate::profile::{JsonFileStore, Profiles, Settings, load};

const HELP: &str = "Commands: /regenerate, /clear, /prompt, /help. Ctrl-D to quit.";

// Profiles are read again before every exchange so edits made in the
// web UI apply to the next turn
async fn exchange_context(
    store: &JsonFileStore,
    config: &AppConfig,
    model: &Option<String>,
) -> Result<(String, CompletionOptions)> {
    let profiles = Profiles::load(store).await?;
    let settings: Settings = load(store).await?;
    let options = CompletionOptions {
        model: model.clone().unwrap_or_else(|| config.openai_model.clone()),
        temperature: settings.temperature,
        max_tokens: settings.max_tokens,
        legacy_sampling: config.legacy_sampling,
    };
    Ok((profiles.system_prompt(), options))
}

pub async fn run(model: Option<String>) -> Result<()> {
    logging::init();

    let config = AppConfig::default();
    let store = JsonFileStore::new(&config.storage_path);
    let client = Arc::new(OpenAiClient::new(
        &config.openai_api_hostname,
        &config.openai_api_key,
    ));
    let mut conversation = Conversation::new(client);
    let mut rl = DefaultEditor::new()?;

    println!("{}", HELP);

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "/help" => println!("{}", HELP),
                    "/clear" => {
                        conversation.clear();
                        println!("Transcript cleared.");
                    }
                    "/prompt" => {
                        let (system_prompt, _) = exchange_context(&store, &config, &model).await?;
                        println!("{}", system_prompt);
                    }
                    "/regenerate" => {
                        let (system_prompt, options) =
                            exchange_context(&store, &config, &model).await?;
                        match conversation.regenerate(&system_prompt, &options).await {
                            Some(turn) => println!("{}", turn.assistant.as_deref().unwrap_or("")),
                            None => println!("Nothing to regenerate."),
                        }
                    }
                    text => {
                        let (system_prompt, options) =
                            exchange_context(&store, &config, &model).await?;
                        let turn = conversation.submit(&system_prompt, text, &options).await;
                        println!("{}", turn.assistant.as_deref().unwrap_or(""));
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
