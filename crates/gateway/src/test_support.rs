//! Shared fixtures for gateway handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vitae_agent::Assistant;
use vitae_core::error::{NotifyError, ProviderError};
use vitae_core::message::Message;
use vitae_core::notify::Notifier;
use vitae_core::persona::Persona;
use vitae_core::provider::{Provider, ProviderRequest, ProviderResponse};
use vitae_core::tool::ToolRegistry;
use vitae_knowledge::KnowledgeBase;

use crate::{GatewayState, SharedState};

/// A provider that replays a scripted list of text answers.
///
/// Calls past the end of the script fail with a network error, which the
/// chat handler is expected to turn into a recoverable reply.
pub struct ScriptedProvider {
    replies: Mutex<Vec<String>>,
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(ProviderError::Network("script exhausted".into()));
        }
        let text = replies.remove(0);
        Ok(ProviderResponse {
            message: Message::assistant(text),
            usage: None,
            model: "scripted-model".into(),
        })
    }
}

/// A notifier that collects every delivered message.
pub struct CollectingNotifier {
    pub sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for CollectingNotifier {
    fn name(&self) -> &str {
        "collecting"
    }

    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Build a gateway state whose provider replays `replies` in order.
///
/// Returns the state plus a handle on the notifier so tests can assert on
/// delivered notifications.
pub fn scripted_state(replies: Vec<&str>) -> (SharedState, Arc<CollectingNotifier>) {
    let notifier = Arc::new(CollectingNotifier {
        sent: Mutex::new(Vec::new()),
    });

    let provider = Arc::new(ScriptedProvider {
        replies: Mutex::new(replies.into_iter().map(String::from).collect()),
    });

    let knowledge = Arc::new(KnowledgeBase {
        text: "Manova leads the data platform team at Initech.".into(),
        image_paths: vec![],
    });

    let assistant = Assistant::new(
        provider,
        Arc::new(ToolRegistry::new()),
        Persona::new("Manova"),
        knowledge,
        "scripted-model",
    );

    let notifier_dyn: Arc<dyn Notifier> = notifier.clone();
    let state = GatewayState::new(assistant, notifier_dyn);
    (state, notifier)
}
