//! Graceful degradation of the retrieval collaborator.

mod common;

use stweave::domain::models::GenerationRequest;
use stweave::services::GenerateOutcome;

use common::{chat_json, orchestrator, ScriptedBackend, ScriptedVerifier, StaticRetriever};

fn request(prompt: &str) -> GenerationRequest {
    GenerationRequest {
        prompt: prompt.to_string(),
    }
}

#[tokio::test]
async fn snippets_are_woven_into_the_initial_prompt() {
    let backend = ScriptedBackend::new(vec![Ok(chat_json("here is some context-aware help"))]);
    let verifier = ScriptedVerifier::new(vec![]);
    let retriever = StaticRetriever::with_snippets(vec![
        "Scan cycles are typically 100ms.".to_string(),
        "Interlocks must be fail-safe.".to_string(),
    ]);
    let orch = orchestrator(&backend, &verifier, Some(retriever.clone()), 2);

    orch.generate(&request("explain interlock design basics"))
        .await
        .unwrap();

    assert_eq!(retriever.calls(), 1);
    let prompt = backend.prompts().remove(0);
    assert!(prompt.contains("Scan cycles are typically 100ms."));
    assert!(prompt.contains("Interlocks must be fail-safe."));
    assert!(prompt.contains("User Request: \"explain interlock design basics\""));
    // Snippets are marked advisory, not authoritative.
    assert!(prompt.contains("advisory only"));
}

#[tokio::test]
async fn unreachable_retriever_never_fails_the_request() {
    let backend = ScriptedBackend::new(vec![Ok(chat_json("answered without context"))]);
    let verifier = ScriptedVerifier::new(vec![]);
    let retriever = StaticRetriever::unreachable();
    let orch = orchestrator(&backend, &verifier, Some(retriever.clone()), 2);

    let outcome = orch
        .generate(&request("explain interlock design basics"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GenerateOutcome::Chat {
            message: "answered without context".to_string()
        }
    );
    assert_eq!(retriever.calls(), 1);
    // The bare prompt was used, with no context block.
    let prompt = backend.prompts().remove(0);
    assert_eq!(prompt, "User Request: \"explain interlock design basics\"");
}

#[tokio::test]
async fn absent_retriever_sends_the_bare_prompt() {
    let backend = ScriptedBackend::new(vec![Ok(chat_json("hello"))]);
    let verifier = ScriptedVerifier::new(vec![]);
    let orch = orchestrator(&backend, &verifier, None, 2);

    orch.generate(&request("hello there friend")).await.unwrap();

    assert_eq!(
        backend.prompts().remove(0),
        "User Request: \"hello there friend\""
    );
}
