//! Conversation state for the assistant chat

use healthprod_domain::{AiPersonality, ChatMessage, ChatRole};
use uuid::Uuid;

use super::service::AssistantService;

/// One conversation with a fixed personality.
///
/// The greeting is the first model message. Changing personality starts a
/// new conversation.
#[derive(Debug, Clone)]
pub struct ChatSession {
    personality: AiPersonality,
    messages: Vec<ChatMessage>,
}

fn message(role: ChatRole, text: impl Into<String>) -> ChatMessage {
    ChatMessage { id: Uuid::new_v4().to_string(), role, text: text.into() }
}

impl ChatSession {
    pub fn new(personality: AiPersonality) -> Self {
        Self { personality, messages: vec![message(ChatRole::Model, personality.greeting())] }
    }

    pub fn personality(&self) -> AiPersonality {
        self.personality
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Switch personality, discarding the history. No-op for the current one.
    pub fn set_personality(&mut self, personality: AiPersonality) {
        if personality != self.personality {
            *self = Self::new(personality);
        }
    }

    /// Send a user message and append the reply. Blank input is ignored.
    pub async fn send(&mut self, assistant: &AssistantService, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        // History excludes the message being sent.
        let reply = assistant.chat(self.personality, &self.messages, text).await;
        self.messages.push(message(ChatRole::User, text));
        self.messages.push(message(ChatRole::Model, reply));
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_personality_greeting() {
        let session = ChatSession::new(AiPersonality::FitnessGuru);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, ChatRole::Model);
        assert_eq!(session.messages()[0].text, AiPersonality::FitnessGuru.greeting());
    }

    #[test]
    fn switching_personality_restarts_conversation() {
        let mut session = ChatSession::new(AiPersonality::FriendlyCoach);
        session.messages.push(message(ChatRole::User, "hello"));

        session.set_personality(AiPersonality::FriendlyCoach);
        assert_eq!(session.messages().len(), 2);

        session.set_personality(AiPersonality::ZenMaster);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.personality(), AiPersonality::ZenMaster);
    }
}
