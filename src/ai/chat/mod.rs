mod core;
pub use self::core::{Conversation, format_error};

mod models;
pub use models::{Transcript, Turn};
