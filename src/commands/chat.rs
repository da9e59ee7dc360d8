use std::sync::Mutex;

use serde::Serialize;
use tauri::State;

use crate::api::{self, ApiError};
use crate::chat::exchange::Exchange;
use crate::chat::message::{Failure, MessageView};
use crate::chat::store::ConversationSummary;
use crate::session::SessionStore;

/// Managed chat state. All mutation happens behind this lock, and the lock
/// is never held across the backend await.
pub struct ChatState {
    exchange: Mutex<Exchange>,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            exchange: Mutex::new(Exchange::new()),
        }
    }
}

/// Snapshot returned to the frontend after every chat command.
#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub conversation_id: Option<String>,
    pub messages: Vec<MessageView>,
    pub in_flight: bool,
    pub error: Option<String>,
}

fn snapshot(exchange: &Exchange, error: Option<String>) -> TurnView {
    TurnView {
        conversation_id: exchange.store().active_id().map(str::to_string),
        messages: exchange.store().messages().iter().map(|m| m.view()).collect(),
        in_flight: exchange.in_flight(),
        error,
    }
}

/// Maps a failed chat call onto the error taxonomy the transcript knows:
/// status errors keep their body for the banner, everything else is
/// treated as a connectivity problem.
fn failure_from(error: ApiError) -> Failure {
    match error {
        ApiError::Status { status, body } => Failure::Server { status, body },
        other => Failure::Network(other.to_string()),
    }
}

/// One full turn: validate, render the user message and the placeholder,
/// call the backend, reconcile and commit. Blank input and re-entrant
/// submits return the unchanged transcript with no error.
#[tauri::command]
pub async fn submit_message(
    state: State<'_, ChatState>,
    session: State<'_, SessionStore>,
    text: String,
) -> Result<TurnView, String> {
    let config = session.backend_config();

    let outbound = {
        let mut exchange = state.exchange.lock().unwrap();
        match exchange.begin(&text) {
            Some(outbound) => outbound,
            None => return Ok(snapshot(&exchange, None)),
        }
    };

    let outcome = api::chat::ask(&config, &outbound)
        .await
        .map(|reply| reply.content)
        .map_err(failure_from);

    let mut exchange = state.exchange.lock().unwrap();
    let banner = exchange.resolve(outcome);
    if let Some(banner) = &banner {
        tracing::warn!(error = %banner, "chat turn failed");
    }
    Ok(snapshot(&exchange, banner))
}

#[tauri::command]
pub fn start_new_conversation(state: State<'_, ChatState>) -> Result<TurnView, String> {
    let mut exchange = state.exchange.lock().unwrap();
    exchange.store_mut().start_new();
    Ok(snapshot(&exchange, None))
}

/// Unknown identifiers leave the active conversation unchanged.
#[tauri::command]
pub fn select_conversation(state: State<'_, ChatState>, id: String) -> Result<TurnView, String> {
    let mut exchange = state.exchange.lock().unwrap();
    exchange.store_mut().select(&id);
    Ok(snapshot(&exchange, None))
}

#[tauri::command]
pub fn list_conversations(
    state: State<'_, ChatState>,
) -> Result<Vec<ConversationSummary>, String> {
    let exchange = state.exchange.lock().unwrap();
    Ok(exchange.store().summaries())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_map_to_server_failures() {
        let failure = failure_from(ApiError::Status {
            status: 500,
            body: "Internal Error".into(),
        });
        assert_eq!(
            failure,
            Failure::Server {
                status: 500,
                body: "Internal Error".into()
            }
        );
    }

    #[test]
    fn other_errors_map_to_network_failures() {
        let failure = failure_from(ApiError::Backend {
            status: 503,
            detail: None,
        });
        match failure {
            Failure::Network(reason) => assert!(!reason.is_empty()),
            other => panic!("expected a network failure, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_reflects_the_exchange() {
        let mut exchange = Exchange::new();
        exchange.begin("hello");

        let view = snapshot(&exchange, None);
        assert_eq!(view.messages.len(), 2);
        assert!(view.in_flight);
        assert_eq!(view.conversation_id, None);
        assert!(view.messages[1].pending);
    }
}
