use serde::{Deserialize, Serialize};

/// Shown in place of a 2xx reply whose `content` field was missing or empty.
pub const EMPTY_REPLY_FALLBACK: &str =
    "We received a response, but it was empty. Please try asking again.";

/// Shown in the transcript when the backend answered with an error status.
pub const SERVER_ERROR_FALLBACK: &str =
    "Sorry, a server error occurred. Please try again shortly.";

/// Shown in the transcript when the request never reached the backend.
pub const NETWORK_ERROR_FALLBACK: &str =
    "There is a problem with the network connection. Please check it and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Why a turn failed. The transcript shows a generic fallback for the
/// message itself; the status-bearing detail goes into a dismissible banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Server { status: u16, body: String },
    Network(String),
}

impl Failure {
    /// Banner text surfaced alongside the fallback message.
    pub fn banner(&self) -> String {
        match self {
            Failure::Server { status, body } => format!("Server error ({status}): {body}"),
            Failure::Network(reason) => format!("Connection error: {reason}"),
        }
    }

    fn fallback(&self) -> &'static str {
        match self {
            Failure::Server { .. } => SERVER_ERROR_FALLBACK,
            Failure::Network(_) => NETWORK_ERROR_FALLBACK,
        }
    }
}

/// Lifecycle of a message body. Assistant replies start out `Pending` and
/// are reconciled exactly once; user messages are born `Resolved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyState {
    Pending,
    Resolved(String),
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub state: ReplyState,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::User,
            state: ReplyState::Resolved(content.into()),
        }
    }

    /// Placeholder appended to the transcript before the network call
    /// resolves, so the UI has a slot to render a loading indicator in.
    pub fn pending_reply() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            state: ReplyState::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == ReplyState::Pending
    }

    /// Transcript text for this message.
    pub fn text(&self) -> &str {
        match &self.state {
            ReplyState::Pending => "",
            ReplyState::Resolved(content) => content,
            ReplyState::Failed(failure) => failure.fallback(),
        }
    }

    pub fn view(&self) -> MessageView {
        MessageView {
            id: self.id.clone(),
            role: self.role,
            content: self.text().to_string(),
            pending: self.is_pending(),
        }
    }
}

/// Wire shape handed to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_resolved_on_creation() {
        let msg = Message::user("What does my policy cover?");
        assert_eq!(msg.role, Role::User);
        assert!(!msg.is_pending());
        assert_eq!(msg.text(), "What does my policy cover?");
    }

    #[test]
    fn pending_reply_renders_empty_text() {
        let msg = Message::pending_reply();
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.is_pending());
        assert_eq!(msg.text(), "");
    }

    #[test]
    fn failed_messages_render_the_matching_fallback() {
        let mut msg = Message::pending_reply();
        msg.state = ReplyState::Failed(Failure::Server {
            status: 500,
            body: "Internal Error".into(),
        });
        assert_eq!(msg.text(), SERVER_ERROR_FALLBACK);

        msg.state = ReplyState::Failed(Failure::Network("connection refused".into()));
        assert_eq!(msg.text(), NETWORK_ERROR_FALLBACK);
    }

    #[test]
    fn banner_embeds_status_and_body() {
        let banner = Failure::Server {
            status: 500,
            body: "Internal Error".into(),
        }
        .banner();
        assert!(banner.contains("500"));
        assert!(banner.contains("Internal Error"));
    }

    #[test]
    fn banner_embeds_network_reason() {
        let banner = Failure::Network("dns lookup failed".into()).banner();
        assert!(banner.contains("dns lookup failed"));
    }
}
