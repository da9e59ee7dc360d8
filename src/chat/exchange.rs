use super::message::{Failure, Message, ReplyState, EMPTY_REPLY_FALLBACK};
use super::store::ConversationStore;

/// Orchestrates one request/response turn against the conversation store.
///
/// A turn has exactly one suspension point, the backend call, so it is split
/// into two synchronous phases: `begin` validates the draft, appends the
/// user message and the pending placeholder and arms the in-flight flag;
/// `resolve` reconciles the placeholder with the outcome and commits the
/// sequence as one turn. The command layer runs the network call in between
/// and never holds the state lock across it.
pub struct Exchange {
    store: ConversationStore,
    in_flight: bool,
}

impl Exchange {
    pub fn new() -> Self {
        Self {
            store: ConversationStore::new(),
            in_flight: false,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    /// Starts a turn. Returns the trimmed text to send, or `None` when the
    /// input is blank or another exchange is still in flight. Both
    /// rejections are silent and leave the transcript untouched.
    pub fn begin(&mut self, draft: &str) -> Option<String> {
        let text = draft.trim();
        if text.is_empty() || self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.store.append(Message::user(text));
        self.store.append(Message::pending_reply());
        Some(text.to_string())
    }

    /// Finishes a turn: replaces the placeholder, commits the sequence and
    /// releases the in-flight flag on every path. Returns the banner text
    /// to surface, if the outcome warrants one.
    ///
    /// A missing or empty `content` field on success is substituted with
    /// [`EMPTY_REPLY_FALLBACK`]; failed turns are committed too, so the
    /// fallback reply stays part of the conversation.
    pub fn resolve(&mut self, outcome: Result<Option<String>, Failure>) -> Option<String> {
        let (state, banner) = match outcome {
            Ok(content) => match content.filter(|c| !c.is_empty()) {
                Some(content) => (ReplyState::Resolved(content), None),
                None => (ReplyState::Resolved(EMPTY_REPLY_FALLBACK.to_string()), None),
            },
            Err(failure) => {
                let banner = failure.banner();
                (ReplyState::Failed(failure), Some(banner))
            }
        };

        let mut messages = self.store.messages().to_vec();
        if let Some(slot) = messages.iter_mut().rev().find(|m| m.is_pending()) {
            slot.state = state;
        }
        self.store.commit_turn(messages);
        self.in_flight = false;
        banner
    }
}
