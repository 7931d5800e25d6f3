use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::ai::chat::Conversation;
use crate::core::AppConfig;
use crate::openai::{ChatCompletion, CompletionOptions, OpenAiClient};
use crate::profile::{JsonFileStore, ProfileStore, Settings};

pub type SharedState = Arc<RwLock<AppState>>;

pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn ProfileStore>,
    pub client: Arc<dyn ChatCompletion>,
    // One conversation per browser session. Each is locked for the
    // whole exchange so turns from the same session never interleave.
    sessions: HashMap<String, Arc<Mutex<Conversation>>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ProfileStore>,
        client: Arc<dyn ChatCompletion>,
    ) -> Self {
        Self {
            config,
            store,
            client,
            sessions: HashMap::new(),
        }
    }

    /// Build state that stores profiles as JSON files and talks to the
    /// completion service named in `config`.
    pub fn from_config(config: AppConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(&config.storage_path));
        let client = Arc::new(OpenAiClient::new(
            &config.openai_api_hostname,
            &config.openai_api_key,
        ));
        Self::new(config, store, client)
    }

    /// The conversation for `session_id`, created empty on first use.
    pub fn session(&mut self, session_id: &str) -> Arc<Mutex<Conversation>> {
        let client = &self.client;
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Conversation::new(Arc::clone(client)))))
            .clone()
    }

    /// The conversation for `session_id` if one has been started.
    pub fn find_session(&self, session_id: &str) -> Option<Arc<Mutex<Conversation>>> {
        self.sessions.get(session_id).cloned()
    }

    pub fn completion_options(&self, settings: &Settings, model: Option<String>) -> CompletionOptions {
        CompletionOptions {
            model: model.unwrap_or_else(|| self.config.openai_model.clone()),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            legacy_sampling: self.config.legacy_sampling,
        }
    }
}
