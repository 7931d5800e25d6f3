use std::sync::Arc;

use super::models::{Transcript, Turn};
use crate::openai::{ChatCompletion, CompletionError, CompletionOptions, exchange};

/// Render a failed exchange as transcript text. The error becomes the
/// reply so the conversation can carry on.
pub fn format_error(err: &CompletionError) -> String {
    format!("Error: {}", err)
}

/// One chat session: the transcript plus the client used to extend it.
///
/// `submit` and `regenerate` take `&mut self` across the network call
/// so a session can only have one exchange in flight. Callers sharing
/// a conversation put it behind an async mutex.
pub struct Conversation {
    transcript: Transcript,
    client: Arc<dyn ChatCompletion>,
}

impl Conversation {
    pub fn new(client: Arc<dyn ChatCompletion>) -> Self {
        Self {
            transcript: Transcript::new(),
            client,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Send `text` as a new turn and record the reply, or the error
    /// text if the exchange failed. Always grows the transcript by one.
    pub async fn submit(
        &mut self,
        system_prompt: &str,
        text: &str,
        options: &CompletionOptions,
    ) -> &Turn {
        self.transcript.push(Turn::pending(text));
        let prior = self.transcript.len() - 1;

        let result = exchange(
            self.client.as_ref(),
            system_prompt,
            &self.transcript.turns()[..prior],
            text,
            options,
        )
        .await;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Chat exchange failed: {}", e);
                format_error(&e)
            }
        };
        self.transcript.set_last_reply(reply);

        &self.transcript.turns()[prior]
    }

    /// Fetch a new reply for the last turn using only the turns before
    /// it as context. Returns `None` and does nothing when the
    /// transcript is empty.
    pub async fn regenerate(
        &mut self,
        system_prompt: &str,
        options: &CompletionOptions,
    ) -> Option<&Turn> {
        let last = self.transcript.len().checked_sub(1)?;
        let user_text = self.transcript.turns()[last].user.clone();

        let result = exchange(
            self.client.as_ref(),
            system_prompt,
            &self.transcript.turns()[..last],
            &user_text,
            options,
        )
        .await;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Regenerating last reply failed: {}", e);
                format_error(&e)
            }
        };
        self.transcript.set_last_reply(reply);

        self.transcript.last()
    }

    pub fn clear(&mut self) {
        self.transcript.clear()
    }
}
