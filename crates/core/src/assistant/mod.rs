//! AI assistant: gateway port, fallback policy and chat sessions

pub mod chat;
pub mod ports;
pub mod service;

pub use chat::ChatSession;
pub use ports::AiGateway;
pub use service::{
    AssistantService, CHAT_FALLBACK, INSIGHTS_EMPTY, INSIGHTS_FALLBACK, MEAL_FALLBACK,
};
