//! End-to-end session lifecycle: turns, reverts, resets and reloads against
//! a scripted conversation service.

use async_trait::async_trait;
use easel::session::{codec, expand};
use easel::{
    Content, ConversationService, EaselError, EaselResult, GenerationOptions, LocalSessionStore,
    Part, RevertEngine, RevertOutcome, SessionStore, TurnController,
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Returns queued responses in order and records what it was sent
#[derive(Default)]
struct ScriptedService {
    responses: Mutex<VecDeque<EaselResult<Vec<Part>>>>,
    calls: Mutex<Vec<(Vec<Content>, Content)>>,
}

impl ScriptedService {
    fn push(&self, response: EaselResult<Vec<Part>>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> Vec<(Vec<Content>, Content)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationService for ScriptedService {
    async fn generate(
        &self,
        history: &[Content],
        message: &Content,
        _options: &GenerationOptions,
    ) -> EaselResult<Vec<Part>> {
        self.calls
            .lock()
            .unwrap()
            .push((history.to_vec(), message.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EaselError::llm("no scripted response left")))
    }
}

struct Harness {
    store: Arc<LocalSessionStore>,
    service: Arc<ScriptedService>,
    controller: TurnController,
    revert: RevertEngine,
    temp: TempDir,
}

fn harness() -> Harness {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(LocalSessionStore::new(
        temp.path().join("tools").join(".image_session.json"),
    ));
    let service = Arc::new(ScriptedService::default());
    let controller = TurnController::new(
        store.clone(),
        service.clone(),
        temp.path().join("recipes").join("photos"),
    );
    let revert = RevertEngine::new(store.clone());
    Harness {
        store,
        service,
        controller,
        revert,
        temp,
    }
}

fn image_response() -> Vec<Part> {
    vec![
        Part::text("A glossy red apple on an oak table.")
            .with_thought_signature(vec![0xde, 0xad, 0xbe, 0xef]),
        Part::blob("image/png", vec![0x89, b'P', b'N', b'G', 13, 10, 26, 10])
            .with_thought_signature(vec![0x00, 0x01, 0xfe]),
    ]
}

fn text_response() -> Vec<Part> {
    vec![Part::text("I could not render that, but here is a description.")
        .with_thought_signature(b"second".to_vec())]
}

fn is_turn_one_name(path: &Path) -> bool {
    let name = path.file_name().unwrap().to_str().unwrap();
    let Some(rest) = name.strip_prefix("output_001_") else {
        return false;
    };
    let Some(time) = rest.strip_suffix(".png") else {
        return false;
    };
    time.len() == 6 && time.chars().all(|c| c.is_ascii_digit())
}

#[tokio::test]
async fn scenario_a_first_turn_with_image() {
    let h = harness();
    h.service.push(Ok(image_response()));

    let outcome = h
        .controller
        .submit_turn("a red apple on a table", &[], &GenerationOptions::default())
        .await
        .unwrap();

    let path = outcome.output_path.clone().unwrap();
    assert!(is_turn_one_name(&path), "unexpected name: {:?}", path);
    assert!(path.starts_with(h.temp.path().join("recipes").join("photos")));
    assert!(path.exists());

    let session = h.store.load().await;
    assert_eq!(session.turn_count, 1);
    assert_eq!(session.history.len(), 2);
    assert_eq!(session.outputs.len(), 1);

    // Fresh conversation: nothing to replay
    assert!(h.service.calls()[0].0.is_empty());
}

#[tokio::test]
async fn scenario_b_and_c_text_only_turn_then_revert() {
    let h = harness();
    h.service.push(Ok(image_response()));
    h.service.push(Ok(text_response()));

    let options = GenerationOptions::default();
    h.controller
        .submit_turn("a red apple on a table", &[], &options)
        .await
        .unwrap();
    let outcome = h
        .controller
        .submit_turn("make it green", &[], &options)
        .await
        .unwrap();

    // Scenario B
    assert!(outcome.output_path.is_none());
    let session = h.store.load().await;
    assert_eq!(session.turn_count, 2);
    assert_eq!(session.history.len(), 4);
    assert_eq!(session.outputs.len(), 1);

    // The second call replayed the first turn with its signatures intact
    let (history, message) = &h.service.calls()[1];
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].parts, vec![Part::text("a red apple on a table")]);
    assert_eq!(history[1].parts, image_response());
    assert_eq!(message.parts, vec![Part::text("make it green")]);

    // Scenario C
    let outputs_before = session.outputs.clone();
    let outcome = h.revert.revert(1).await.unwrap();
    assert_eq!(outcome.turn_count(), Some(1));

    let session = h.store.load().await;
    assert_eq!(session.turn_count, 1);
    assert_eq!(session.history.len(), 2);
    assert_eq!(session.outputs, outputs_before);
}

#[tokio::test]
async fn scenario_d_missing_reference_is_skipped() {
    let h = harness();
    let existing = h.temp.path().join("reference.png");
    std::fs::write(&existing, [1u8, 2, 3, 4]).unwrap();
    let missing = h.temp.path().join("does-not-exist.png");
    h.service.push(Ok(image_response()));

    let outcome = h
        .controller
        .submit_turn(
            "plate it like this",
            &[existing, missing.clone()],
            &GenerationOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.skipped_references, vec![missing]);
    let (_, message) = &h.service.calls()[0];
    assert_eq!(
        message.parts,
        vec![
            Part::text("plate it like this"),
            Part::blob("image/png", vec![1, 2, 3, 4]),
        ]
    );
}

#[tokio::test]
async fn persisted_history_round_trips_byte_for_byte() {
    let h = harness();
    h.service.push(Ok(image_response()));
    h.service.push(Ok(text_response()));
    let options = GenerationOptions::default();
    h.controller.submit_turn("one", &[], &options).await.unwrap();
    h.controller.submit_turn("two", &[], &options).await.unwrap();

    let session = h.store.load().await;
    let reloaded = codec::decode(Some(&codec::encode(&session).unwrap()));
    assert_eq!(reloaded, session);

    let live = expand(&reloaded.history);
    assert_eq!(live[1].parts, image_response());
    assert_eq!(live[3].parts, text_response());
}

#[tokio::test]
async fn service_failure_leaves_session_untouched() {
    let h = harness();
    h.service.push(Ok(image_response()));
    h.service.push(Err(EaselError::http("Google API error (status 503)", Some(503))));
    let options = GenerationOptions::default();

    h.controller.submit_turn("one", &[], &options).await.unwrap();
    let before = std::fs::read_to_string(h.store.path()).unwrap();

    let err = h
        .controller
        .submit_turn("two", &[], &options)
        .await
        .unwrap_err();
    assert!(err.is_service_failure());

    let after = std::fs::read_to_string(h.store.path()).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn invariant_holds_across_turns_and_reverts() {
    let h = harness();
    let options = GenerationOptions::default();

    for i in 0..5 {
        h.service.push(Ok(if i % 2 == 0 {
            image_response()
        } else {
            text_response()
        }));
        h.controller
            .submit_turn(&format!("step {}", i), &[], &options)
            .await
            .unwrap();
        assert!(h.store.load().await.is_consistent());
    }

    for n in [2, 1, 9] {
        h.revert.revert(n).await.unwrap();
        assert!(h.store.load().await.is_consistent());
    }

    let session = h.store.load().await;
    assert_eq!(session.turn_count, 0);
    assert!(session.history.is_empty());
    assert!(session.outputs.is_empty());
    assert_eq!(h.revert.revert(1).await.unwrap(), RevertOutcome::NothingToRevert);
}

#[tokio::test]
async fn corrupt_session_file_starts_over() {
    let h = harness();
    std::fs::create_dir_all(h.store.path().parent().unwrap()).unwrap();
    std::fs::write(h.store.path(), b"\x00\x01 definitely not json").unwrap();

    assert_eq!(h.store.load().await.turn_count, 0);
    assert!(h.store.describe().await.is_none());

    h.service.push(Ok(image_response()));
    let outcome = h
        .controller
        .submit_turn("fresh start", &[], &GenerationOptions::default())
        .await
        .unwrap();
    assert_eq!(outcome.turn_count, 1);
    assert!(h.service.calls()[0].0.is_empty());
}

#[tokio::test]
async fn reset_twice_is_harmless() {
    let h = harness();
    h.service.push(Ok(image_response()));
    h.controller
        .submit_turn("one", &[], &GenerationOptions::default())
        .await
        .unwrap();

    assert!(h.store.reset().await.unwrap().is_empty());
    assert!(h.store.reset().await.unwrap().is_empty());
    assert!(h.store.describe().await.is_none());
}
