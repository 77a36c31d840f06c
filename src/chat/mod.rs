pub mod engine;
mod models;

pub use engine::{
    RequestConfig, build_request_messages, format_note_insertion, send_user_message,
};
pub use models::{Message, Role, Transcript};
