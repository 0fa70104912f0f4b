//! Conversation state for the water-conservation assistant.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::clock::Clock;
use crate::remote::ChatbotRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: i64,
}

pub struct ChatSession {
    chatbot: Arc<dyn ChatbotRepository>,
    clock: Arc<dyn Clock>,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(chatbot: Arc<dyn ChatbotRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            chatbot,
            clock,
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Posts the question and the bot's reply. Blank input is ignored and
    /// returns `None`; failures become an apology message.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let question = text.trim();
        if question.is_empty() {
            return None;
        }
        self.push(question.to_string(), Sender::User);

        let reply = match self.chatbot.ask(question).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "chatbot request failed");
                format!("Sorry, I couldn't get an answer right now: {err}")
            }
        };
        self.push(reply, Sender::Bot);
        self.messages.last()
    }

    fn push(&mut self, text: String, sender: Sender) {
        self.messages.push(ChatMessage {
            id: Uuid::new_v4().to_string(),
            text,
            sender,
            timestamp: self.clock.now_millis(),
        });
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::clock::FixedClock;
    use crate::remote::RemoteError;

    struct Echo;

    #[async_trait]
    impl ChatbotRepository for Echo {
        async fn ask(&self, question: &str) -> Result<String, RemoteError> {
            Ok(format!("you asked: {question}"))
        }
    }

    struct Offline;

    #[async_trait]
    impl ChatbotRepository for Offline {
        async fn ask(&self, _question: &str) -> Result<String, RemoteError> {
            Err(RemoteError::EmptyBody)
        }
    }

    #[tokio::test]
    async fn send_appends_question_and_answer() {
        let mut session = ChatSession::new(Arc::new(Echo), Arc::new(FixedClock(1_700)));
        let reply = session.send("  what is runoff?  ").await.cloned();

        assert_eq!(
            reply.map(|m| m.text),
            Some("you asked: what is runoff?".to_string())
        );
        let senders: Vec<Sender> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot]);
        assert!(session.messages().iter().all(|m| m.timestamp == 1_700));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut session = ChatSession::new(Arc::new(Echo), Arc::new(FixedClock(0)));
        assert!(session.send("   ").await.is_none());
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn failures_become_apologies() {
        let mut session = ChatSession::new(Arc::new(Offline), Arc::new(FixedClock(0)));
        let reply = session.send("hello").await.expect("reply posted");
        assert_eq!(reply.sender, Sender::Bot);
        assert!(reply.text.starts_with("Sorry"));
        assert!(reply.text.contains("empty body"));
    }
}
