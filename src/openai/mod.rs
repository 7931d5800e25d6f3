mod core;
pub use self::core::{
    ChatCompletion, CompletionError, CompletionOptions, Message, OpenAiClient, Role,
    UNAVAILABLE_MODEL, completion, completion_payload, list_models,
};

mod chat;
pub use chat::{build_messages, exchange};
