//! Scripted port implementations shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use stweave::domain::models::{FallbackConfig, VerificationOutcome};
use stweave::domain::ports::{
    ContextRetriever, GenerationBackend, GenerationError, RetrievalError, SyntaxVerifier,
    VerifierError,
};
use stweave::services::Orchestrator;

/// Generation backend that replays a scripted sequence of responses and
/// records the prompts it was called with.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(
        &self,
        prompt: &str,
        _system_instruction: &str,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("backend called more times than scripted")
    }
}

/// Verifier that replays a scripted sequence of outcomes.
pub struct ScriptedVerifier {
    outcomes: Mutex<VecDeque<Result<VerificationOutcome, VerifierError>>>,
    calls: AtomicUsize,
}

impl ScriptedVerifier {
    pub fn new(outcomes: Vec<Result<VerificationOutcome, VerifierError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SyntaxVerifier for ScriptedVerifier {
    async fn verify(&self, _source: &str) -> Result<VerificationOutcome, VerifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("verifier called more times than scripted")
    }
}

/// Retriever that always answers the same way.
pub struct StaticRetriever {
    result: Result<Vec<String>, ()>,
    calls: AtomicUsize,
}

impl StaticRetriever {
    pub fn with_snippets(snippets: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(snippets),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            result: Err(()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContextRetriever for StaticRetriever {
    async fn query(&self, _prompt: &str) -> Result<Vec<String>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(snippets) => Ok(snippets.clone()),
            Err(()) => Err(RetrievalError::Unreachable(
                "connection refused".to_string(),
            )),
        }
    }
}

/// Build an orchestrator over the scripted ports with the default fallback
/// policy and the given retry ceiling.
pub fn orchestrator(
    backend: &Arc<ScriptedBackend>,
    verifier: &Arc<ScriptedVerifier>,
    retriever: Option<Arc<StaticRetriever>>,
    max_retries: u32,
) -> Orchestrator {
    Orchestrator::new(
        Arc::clone(backend) as Arc<dyn GenerationBackend>,
        Arc::clone(verifier) as Arc<dyn SyntaxVerifier>,
        retriever.map(|r| r as Arc<dyn ContextRetriever>),
        FallbackConfig::default(),
        max_retries,
    )
}

/// A well-formed chat response as the backend would emit it.
pub fn chat_json(message: &str) -> String {
    serde_json::json!({"response_type": "chat", "message": message}).to_string()
}

/// A well-formed code response as the backend would emit it.
pub fn code_json(structured_text: &str) -> String {
    serde_json::json!({
        "response_type": "plc_code",
        "explanation": "Generated logic.",
        "required_variables": "VAR\n  Motor : BOOL;\nEND_VAR",
        "structured_text": structured_text,
        "verification_notes": "Reviewed.",
        "simulation_trace": "Cycle 1: Motor := TRUE."
    })
    .to_string()
}
