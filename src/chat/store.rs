use chrono::{DateTime, Utc};
use serde::Serialize;

use super::message::{Message, Role};

const TITLE_MAX_CHARS: usize = 30;

/// Which conversation the on-screen message sequence belongs to.
///
/// A draft has no identifier. One is assigned the first time a turn is
/// committed, never earlier, so an untouched draft leaves no trace in the
/// sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveConversation {
    Draft,
    Persisted(String),
}

#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sidebar row for a stored conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// In-memory conversation list plus the active message sequence.
///
/// Lives for the process only. Nothing here touches disk, and there is no
/// delete operation; the list is discarded with the window.
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active: ActiveConversation,
    messages: Vec<Message>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
            active: ActiveConversation::Draft,
            messages: Vec::new(),
        }
    }

    /// Clears the active sequence and returns to the draft state. Stored
    /// conversations are untouched.
    pub fn start_new(&mut self) {
        self.active = ActiveConversation::Draft;
        self.messages.clear();
    }

    /// Makes an existing conversation active and loads its messages.
    /// Unknown identifiers leave the current state unchanged.
    pub fn select(&mut self, id: &str) {
        if let Some(conversation) = self.conversations.iter().find(|c| c.id == id) {
            self.messages = conversation.messages.clone();
            self.active = ActiveConversation::Persisted(conversation.id.clone());
        }
    }

    /// Appends a message to the active sequence without committing it.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Commits a finalized turn.
    ///
    /// The sequence always becomes the on-screen state. It is only persisted
    /// when it contains a user message, since the title is derived from the
    /// first one; a sequence without one is silently dropped from the list.
    pub fn commit_turn(&mut self, messages: Vec<Message>) {
        let first_user = messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.text().to_string());
        self.messages = messages;

        let Some(first_user) = first_user else {
            return;
        };

        match self.active.clone() {
            ActiveConversation::Persisted(id) => {
                if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) {
                    conversation.messages = self.messages.clone();
                    conversation.updated_at = Utc::now();
                }
            }
            ActiveConversation::Draft => {
                let now = Utc::now();
                let conversation = Conversation {
                    id: uuid::Uuid::new_v4().to_string(),
                    title: derive_title(&first_user),
                    messages: self.messages.clone(),
                    created_at: now,
                    updated_at: now,
                };
                self.active = ActiveConversation::Persisted(conversation.id.clone());
                self.conversations.insert(0, conversation);
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn active_id(&self) -> Option<&str> {
        match &self.active {
            ActiveConversation::Draft => None,
            ActiveConversation::Persisted(id) => Some(id),
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn summaries(&self) -> Vec<ConversationSummary> {
        self.conversations
            .iter()
            .map(|c| ConversationSummary {
                id: c.id.clone(),
                title: c.title.clone(),
                updated_at: c.updated_at,
            })
            .collect()
    }
}

/// Title for a new conversation: the first user message, truncated to 30
/// characters plus an ellipsis when longer.
fn derive_title(first_message: &str) -> String {
    let mut chars = first_message.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
