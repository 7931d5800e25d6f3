use crate::ai::chat::Turn;
use crate::openai::{ChatCompletion, CompletionError, CompletionOptions, Message, Role};

/// Build the message sequence for the next reply: the system prompt,
/// each prior turn as a user/assistant pair, then the new user
/// message. Turns still waiting on a reply only contribute the user
/// side.
pub fn build_messages(system_prompt: &str, history: &[Turn], user_text: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(Message::new(Role::System, system_prompt));
    for turn in history {
        messages.push(Message::new(Role::User, &turn.user));
        if let Some(reply) = &turn.assistant {
            messages.push(Message::new(Role::Assistant, reply));
        }
    }
    messages.push(Message::new(Role::User, user_text));
    messages
}

/// Exchange one user message with the completion service using
/// `history` as prior context. Issues exactly one request.
pub async fn exchange(
    client: &dyn ChatCompletion,
    system_prompt: &str,
    history: &[Turn],
    user_text: &str,
    options: &CompletionOptions,
) -> Result<String, CompletionError> {
    let messages = build_messages(system_prompt, history, user_text);
    client.complete(&messages, options).await
}
