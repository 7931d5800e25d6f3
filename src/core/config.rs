use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
    // Send the fixed top_p/frequency_penalty/presence_penalty fields
    // that older completion servers expect
    pub legacy_sampling: bool,
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("CHARCHAT_STORAGE_PATH").unwrap_or("./data".to_string());
        let openai_api_hostname = env::var("CHARCHAT_LLM_HOST")
            .unwrap_or_else(|_| "http://localhost:1234".to_string());
        // Local servers like LM Studio ignore the key but some clients
        // refuse to send a request without one
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "not-needed".to_string());
        let openai_model =
            env::var("CHARCHAT_LLM_MODEL").unwrap_or_else(|_| "local-model".to_string());
        let legacy_sampling = env_flag("CHARCHAT_LEGACY_SAMPLING", true);

        Self {
            storage_path,
            openai_api_hostname,
            openai_api_key,
            openai_model,
            legacy_sampling,
        }
    }
}
