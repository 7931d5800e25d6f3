use crate::core::AppConfig;
use crate::openai::OpenAiClient;

pub async fn run() {
    let config = AppConfig::default();
    let client = OpenAiClient::new(&config.openai_api_hostname, &config.openai_api_key);
    for model in client.models().await {
        if model == config.openai_model {
            println!("{} (default)", model);
        } else {
            println!("{}", model);
        }
    }
}
