use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::Message;

/// Chat history kept by the terminal front end and replayed on every call.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Session {
        Session {
            id: Uuid::new_v4().to_string(),
            messages: Vec::<Message>::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // Append one completed user/assistant exchange
    pub fn record_exchange(&mut self, user: &str, answer: &str) {
        self.messages.push(Message::user(user));
        self.messages.push(Message::assistant(answer));
        self.updated_at = Utc::now();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.updated_at = Utc::now();
    }

    pub fn turns(&self) -> usize {
        self.messages.len() / 2
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
