//! End-to-end integration tests for the vitae assistant.
//!
//! These exercise the full pipeline from a visitor message to the final
//! answer: knowledge loading from real files, prompt assembly, tool
//! execution, and contact notifications.

use std::sync::{Arc, Mutex};

use vitae_agent::Assistant;
use vitae_core::error::{NotifyError, ProviderError};
use vitae_core::message::{Message, MessageToolCall};
use vitae_core::notify::Notifier;
use vitae_core::persona::Persona;
use vitae_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use vitae_knowledge::{DocumentSet, KnowledgeBase};
use vitae_tools::default_registry;

// ── Mock provider ────────────────────────────────────────────────────────

/// Returns scripted responses in sequence and records every request.
struct ScriptedProvider {
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn text(answer: &str) -> Self {
        Self::new(vec![text_response(answer)])
    }

    fn tool_then_text(tool_calls: Vec<MessageToolCall>, answer: &str) -> Self {
        Self::new(vec![tool_response(tool_calls), text_response(answer)])
    }

    fn first_request(&self) -> ProviderRequest {
        self.requests.lock().unwrap()[0].clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(ProviderError::Network("script exhausted".into()));
        }
        Ok(responses.remove(0))
    }
}

fn text_response(answer: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(answer),
        usage: Some(Usage {
            prompt_tokens: 50,
            completion_tokens: 20,
            total_tokens: 70,
        }),
        model: "e2e-model".into(),
    }
}

fn tool_response(tool_calls: Vec<MessageToolCall>) -> ProviderResponse {
    let mut message = Message::assistant("");
    message.tool_calls = tool_calls;
    ProviderResponse {
        message,
        usage: None,
        model: "e2e-model".into(),
    }
}

// ── Collecting notifier ──────────────────────────────────────────────────

#[derive(Default)]
struct CollectingNotifier {
    sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Notifier for CollectingNotifier {
    fn name(&self) -> &str {
        "collecting"
    }

    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ── Pipeline assembly ────────────────────────────────────────────────────

fn assistant_over(
    provider: Arc<ScriptedProvider>,
    notifier: Arc<CollectingNotifier>,
    knowledge: KnowledgeBase,
) -> Assistant {
    let notifier_dyn: Arc<dyn Notifier> = notifier;
    let tools = Arc::new(default_registry(notifier_dyn));
    Assistant::new(
        provider,
        tools,
        Persona::new("Dana Voss"),
        Arc::new(knowledge),
        "e2e-model",
    )
}

/// Write a real profile document to disk and load it the way a
/// deployment would.
fn knowledge_from_temp_files() -> (tempfile::TempDir, KnowledgeBase) {
    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join("summary.txt");
    std::fs::write(
        &summary,
        "Dana Voss is a staff engineer with twelve years of distributed-systems work.",
    )
    .unwrap();

    let documents = DocumentSet::new(vec![], vec![summary], vec![]);
    let knowledge = KnowledgeBase::load(&documents);
    (dir, knowledge)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn document_text_reaches_the_system_prompt() {
    let (_dir, knowledge) = knowledge_from_temp_files();
    let provider = Arc::new(ScriptedProvider::text(
        "I have twelve years of distributed-systems experience.",
    ));
    let notifier = Arc::new(CollectingNotifier::default());
    let assistant = assistant_over(provider.clone(), notifier, knowledge);

    let answer = assistant
        .respond("What's your professional background?", &[])
        .await
        .unwrap();

    assert_eq!(answer, "I have twelve years of distributed-systems experience.");

    let request = provider.first_request();
    assert_eq!(request.model, "e2e-model");
    let system = &request.messages[0];
    assert!(system.content.contains("Dana Voss"));
    assert!(
        system
            .content
            .contains("twelve years of distributed-systems work")
    );
}

#[tokio::test]
async fn contact_tool_call_notifies_and_answers() {
    let (_dir, knowledge) = knowledge_from_temp_files();
    let call = MessageToolCall {
        id: "call_1".into(),
        name: "record_user_details".into(),
        arguments: serde_json::json!({
            "email": "recruiter@example.com",
            "name": "Sam Chen",
            "notes": "Hiring for platform team"
        })
        .to_string(),
    };
    let provider = Arc::new(ScriptedProvider::tool_then_text(
        vec![call],
        "Thanks, I have your details and will be in touch.",
    ));
    let notifier = Arc::new(CollectingNotifier::default());
    let assistant = assistant_over(provider, notifier.clone(), knowledge);

    let answer = assistant
        .respond("Please take my email: recruiter@example.com", &[])
        .await
        .unwrap();

    assert_eq!(answer, "Thanks, I have your details and will be in touch.");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        "Recording Sam Chen with email recruiter@example.com and notes Hiring for platform team"
    );
}

#[tokio::test]
async fn dont_know_reply_records_the_unknown_question() {
    let (_dir, knowledge) = knowledge_from_temp_files();
    let provider = Arc::new(ScriptedProvider::text(
        "I don't know the answer to that one.",
    ));
    let notifier = Arc::new(CollectingNotifier::default());
    let assistant = assistant_over(provider, notifier.clone(), knowledge);

    let answer = assistant
        .respond("What is your favourite compiler flag?", &[])
        .await
        .unwrap();

    assert_eq!(answer, "I don't know the answer to that one.");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        "Recording unknown question: What is your favourite compiler flag?"
    );
}
