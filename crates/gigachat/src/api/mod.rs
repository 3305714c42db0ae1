//! HTTP session and wire types for the GigaChat API.

mod session;
mod wire;

pub use session::Session;
pub use wire::DEFAULT_MODEL;

pub(crate) use wire::{
    CHAT_COMPLETIONS, ChatCompletionRequest, ChatMessage, MODELS, OauthTokenResponse, ROLE_SYSTEM,
    ROLE_USER,
};
