//! Orchestrator behaviour tests against in-memory collaborators.
//!
//! Every externally visible property of the generation workflow is
//! exercised here: validation ordering, failure isolation across the
//! scene loop, the aggregate zero-success check, and the single record
//! write.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;

use sceneshot_core::error::CoreError;
use sceneshot_core::scene::SceneCatalog;
use sceneshot_db::models::generation::{CreateGeneration, GenerateScenesRequest};
use sceneshot_pipeline::collaborators::{
    FetchError, FetchedImage, GeneratedPart, GeneratorError, ImageGenerator, RecordError,
    RecordStore, SourceImageFetcher,
};
use sceneshot_pipeline::Orchestrator;
use sceneshot_storage::{AssetVisibility, ObjectStore, StorageError};

// ---------------------------------------------------------------------------
// Stub collaborators
// ---------------------------------------------------------------------------

/// Scripted source-image fetcher counting its invocations.
struct StubFetcher {
    outcome: FetchOutcome,
    calls: AtomicUsize,
}

enum FetchOutcome {
    Success {
        content_type: Option<&'static str>,
        bytes: Vec<u8>,
    },
    Status(u16),
    Transport(&'static str),
}

impl StubFetcher {
    fn jpeg() -> Self {
        Self::with(FetchOutcome::Success {
            content_type: Some("image/jpeg"),
            bytes: vec![0xFF, 0xD8, 0xFF],
        })
    }

    fn with(outcome: FetchOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceImageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedImage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            FetchOutcome::Success {
                content_type,
                bytes,
            } => Ok(FetchedImage {
                content_type: content_type.map(str::to_string),
                bytes: bytes.clone(),
            }),
            FetchOutcome::Status(status) => Err(FetchError::Status(*status)),
            FetchOutcome::Transport(msg) => Err(FetchError::Transport((*msg).to_string())),
        }
    }
}

/// Generator that pops one scripted outcome per call and records the
/// MIME type and prompt it was handed.
struct ScriptedGenerator {
    outcomes: Mutex<VecDeque<Result<Vec<GeneratedPart>, GeneratorError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    fn new(outcomes: Vec<Result<Vec<GeneratedPart>, GeneratorError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A generator that returns one image for every scene.
    fn always_image() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn recorded_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

fn image_parts() -> Vec<GeneratedPart> {
    vec![
        GeneratedPart::Text("here you go".to_string()),
        GeneratedPart::Image {
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
        },
    ]
}

#[async_trait]
impl ImageGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<Vec<GeneratedPart>, GeneratorError> {
        self.calls
            .lock()
            .unwrap()
            .push((mime_type.to_string(), prompt.to_string()));
        match self.outcomes.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(image_parts()),
        }
    }
}

/// In-memory object store recording uploads and public-URL requests.
#[derive(Default)]
struct MemoryStore {
    objects: Mutex<Vec<(String, usize, String)>>,
    published: Mutex<Vec<String>>,
}

impl MemoryStore {
    fn stored_paths(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _, _)| path.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.objects
            .lock()
            .unwrap()
            .push((path.to_string(), bytes.len(), content_type.to_string()));
        Ok(())
    }

    async fn make_public(&self, path: &str) -> Result<String, StorageError> {
        self.published.lock().unwrap().push(path.to_string());
        Ok(format!("https://cdn.test/{path}"))
    }
}

/// Record store collecting created rows.
#[derive(Default)]
struct RecordingStore {
    records: Mutex<Vec<CreateGeneration>>,
}

impl RecordingStore {
    fn created(&self) -> Vec<CreateGeneration> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn create(&self, record: CreateGeneration) -> Result<(), RecordError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    fetcher: Arc<StubFetcher>,
    generator: Arc<ScriptedGenerator>,
    store: Arc<MemoryStore>,
    records: Arc<RecordingStore>,
    orchestrator: Orchestrator,
}

fn harness(fetcher: StubFetcher, generator: ScriptedGenerator) -> Harness {
    harness_with_visibility(fetcher, generator, AssetVisibility::Private)
}

fn harness_with_visibility(
    fetcher: StubFetcher,
    generator: ScriptedGenerator,
    visibility: AssetVisibility,
) -> Harness {
    let fetcher = Arc::new(fetcher);
    let generator = Arc::new(generator);
    let store = Arc::new(MemoryStore::default());
    let records = Arc::new(RecordingStore::default());

    let orchestrator = Orchestrator::new(
        SceneCatalog::builtin(),
        Arc::clone(&fetcher) as Arc<dyn SourceImageFetcher>,
        Some(Arc::clone(&generator) as Arc<dyn ImageGenerator>),
        Arc::clone(&store) as Arc<dyn ObjectStore>,
        Arc::clone(&records) as Arc<dyn RecordStore>,
        visibility,
    );

    Harness {
        fetcher,
        generator,
        store,
        records,
        orchestrator,
    }
}

fn valid_request() -> GenerateScenesRequest {
    GenerateScenesRequest {
        image_url: Some("https://uploads.test/users/u1/photo.jpg".to_string()),
        image_path: Some("users/u1/photo.jpg".to_string()),
        scene_ids: None,
    }
}

// ---------------------------------------------------------------------------
// Validation ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_identity_fails_before_any_external_call() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let err = h.orchestrator.generate(&valid_request(), "").await.unwrap_err();

    assert_matches!(err, CoreError::Unauthorized(_));
    assert_eq!(h.fetcher.call_count(), 0);
    assert_eq!(h.generator.call_count(), 0);
    assert!(h.records.created().is_empty());
}

#[tokio::test]
async fn missing_fields_are_validation_failures() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let mut request = valid_request();
    request.image_url = None;
    assert_matches!(
        h.orchestrator.generate(&request, "u1").await.unwrap_err(),
        CoreError::Validation(_)
    );

    let mut request = valid_request();
    request.image_path = Some(String::new());
    assert_matches!(
        h.orchestrator.generate(&request, "u1").await.unwrap_err(),
        CoreError::Validation(_)
    );

    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn foreign_image_path_is_forbidden_before_any_network_call() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let mut request = valid_request();
    request.image_path = Some("users/u2/photo.jpg".to_string());

    let err = h.orchestrator.generate(&request, "u1").await.unwrap_err();

    assert_matches!(err, CoreError::Forbidden(_));
    assert_eq!(h.fetcher.call_count(), 0);
    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn all_unknown_scene_ids_are_a_validation_failure() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let mut request = valid_request();
    request.scene_ids = Some(vec!["space".to_string(), "moon".to_string()]);

    let err = h.orchestrator.generate(&request, "u1").await.unwrap_err();

    assert_matches!(err, CoreError::Validation(_));
    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn missing_credential_is_internal_before_any_fetch() {
    let fetcher = Arc::new(StubFetcher::jpeg());
    let store = Arc::new(MemoryStore::default());
    let records = Arc::new(RecordingStore::default());

    let orchestrator = Orchestrator::new(
        SceneCatalog::builtin(),
        Arc::clone(&fetcher) as Arc<dyn SourceImageFetcher>,
        None,
        store as Arc<dyn ObjectStore>,
        records as Arc<dyn RecordStore>,
        AssetVisibility::Private,
    );

    let err = orchestrator.generate(&valid_request(), "u1").await.unwrap_err();

    assert_matches!(err, CoreError::Internal(_));
    assert_eq!(fetcher.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Source fetch and content type
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_source_fetch_is_not_found() {
    let h = harness(
        StubFetcher::with(FetchOutcome::Status(404)),
        ScriptedGenerator::always_image(),
    );

    let err = h.orchestrator.generate(&valid_request(), "u1").await.unwrap_err();

    assert_matches!(err, CoreError::NotFound { .. });
    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn source_fetch_transport_failure_is_internal() {
    let h = harness(
        StubFetcher::with(FetchOutcome::Transport("connection refused")),
        ScriptedGenerator::always_image(),
    );

    let err = h.orchestrator.generate(&valid_request(), "u1").await.unwrap_err();

    assert_matches!(err, CoreError::Internal(_));
}

#[tokio::test]
async fn non_image_content_type_fails_before_generation() {
    let h = harness(
        StubFetcher::with(FetchOutcome::Success {
            content_type: Some("text/html; charset=utf-8"),
            bytes: b"<html>".to_vec(),
        }),
        ScriptedGenerator::always_image(),
    );

    let err = h.orchestrator.generate(&valid_request(), "u1").await.unwrap_err();

    assert_matches!(err, CoreError::Validation(_));
    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn missing_content_type_fails_before_generation() {
    let h = harness(
        StubFetcher::with(FetchOutcome::Success {
            content_type: None,
            bytes: vec![1, 2, 3],
        }),
        ScriptedGenerator::always_image(),
    );

    let err = h.orchestrator.generate(&valid_request(), "u1").await.unwrap_err();

    assert_matches!(err, CoreError::Validation(_));
    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn jpg_content_type_is_normalized_for_the_generator() {
    let h = harness(
        StubFetcher::with(FetchOutcome::Success {
            content_type: Some("image/jpg; charset=binary"),
            bytes: vec![0xFF, 0xD8],
        }),
        ScriptedGenerator::always_image(),
    );

    h.orchestrator.generate(&valid_request(), "u1").await.unwrap();

    for (mime_type, _) in h.generator.recorded_calls() {
        assert_eq!(mime_type, "image/jpeg");
    }
}

// ---------------------------------------------------------------------------
// Scene loop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_catalog_is_used_when_no_scenes_selected() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let response = h.orchestrator.generate(&valid_request(), "u1").await.unwrap();

    assert!(response.success);
    let scenes: Vec<&str> = response.images.iter().map(|i| i.scene.as_str()).collect();
    assert_eq!(scenes, vec!["beach", "city", "mountain", "cafe"]);
}

#[tokio::test]
async fn prompts_are_scene_specific() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let mut request = valid_request();
    request.scene_ids = Some(vec!["beach".to_string(), "cafe".to_string()]);
    h.orchestrator.generate(&request, "u1").await.unwrap();

    let calls = h.generator.recorded_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].1.contains("tropical beach"));
    assert!(calls[1].1.contains("sidewalk cafe"));
}

#[tokio::test]
async fn partial_failure_keeps_successful_scenes() {
    // Scenes run in catalog order: beach and cafe succeed, the middle
    // two fail in different ways.
    let generator = ScriptedGenerator::new(vec![
        Ok(image_parts()),
        Err(GeneratorError("model overloaded".to_string())),
        Ok(vec![GeneratedPart::Text("no image for you".to_string())]),
        Ok(image_parts()),
    ]);
    let h = harness(StubFetcher::jpeg(), generator);

    let response = h.orchestrator.generate(&valid_request(), "u1").await.unwrap();

    assert!(response.success);
    let scenes: Vec<&str> = response.images.iter().map(|i| i.scene.as_str()).collect();
    assert_eq!(scenes, vec!["beach", "cafe"]);

    // Only the successes were uploaded and recorded.
    assert_eq!(h.store.stored_paths().len(), 2);
    let records = h.records.created();
    assert_eq!(records.len(), 1);
    let recorded = records[0].images.as_array().unwrap();
    assert_eq!(recorded.len(), 2);
}

#[tokio::test]
async fn total_failure_is_internal_and_persists_nothing() {
    let generator = ScriptedGenerator::new(vec![
        Err(GeneratorError("boom".to_string())),
        Err(GeneratorError("boom".to_string())),
        Ok(vec![]),
        Ok(vec![GeneratedPart::Text("refused".to_string())]),
    ]);
    let h = harness(StubFetcher::jpeg(), generator);

    let err = h.orchestrator.generate(&valid_request(), "u1").await.unwrap_err();

    assert_matches!(err, CoreError::Internal(_));
    assert!(h.store.stored_paths().is_empty());
    assert!(h.records.created().is_empty());
}

// ---------------------------------------------------------------------------
// Persistence and response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn end_to_end_selected_scenes() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let request = GenerateScenesRequest {
        image_url: Some("https://uploads.test/users/u1/photo.jpg".to_string()),
        image_path: Some("users/u1/photo.jpg".to_string()),
        scene_ids: Some(vec!["beach".to_string(), "city".to_string()]),
    };
    let response = h.orchestrator.generate(&request, "u1").await.unwrap();

    assert!(response.success);
    assert!(!response.generation_id.is_empty());
    assert_eq!(response.images.len(), 2);
    for image in &response.images {
        assert!(["beach", "city"].contains(&image.scene.as_str()));
        assert!(!image.location().is_empty());
    }

    // Uploads land under the caller's generated namespace.
    let prefix = format!("users/u1/generated/{}/", response.generation_id);
    for path in h.store.stored_paths() {
        assert!(path.starts_with(&prefix), "unexpected path {path}");
        assert!(path.ends_with(".png"));
    }

    // Exactly one record, scoped to the caller.
    let records = h.records.created();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, response.generation_id);
    assert_eq!(records[0].user_id, "u1");
    assert_eq!(records[0].status, "completed");
    assert_eq!(
        records[0].original_image_url,
        "https://uploads.test/users/u1/photo.jpg"
    );
}

#[tokio::test]
async fn identical_requests_get_distinct_generation_ids() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let first = h.orchestrator.generate(&valid_request(), "u1").await.unwrap();
    let second = h.orchestrator.generate(&valid_request(), "u1").await.unwrap();

    assert_ne!(first.generation_id, second.generation_id);
    assert_eq!(h.records.created().len(), 2);
}

#[tokio::test]
async fn private_visibility_records_paths_not_urls() {
    let h = harness(StubFetcher::jpeg(), ScriptedGenerator::always_image());

    let response = h.orchestrator.generate(&valid_request(), "u1").await.unwrap();

    for image in &response.images {
        assert!(image.path.is_some());
        assert!(image.url.is_none());
    }
    assert!(h.store.published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn public_visibility_records_public_urls() {
    let h = harness_with_visibility(
        StubFetcher::jpeg(),
        ScriptedGenerator::always_image(),
        AssetVisibility::Public,
    );

    let response = h.orchestrator.generate(&valid_request(), "u1").await.unwrap();

    for image in &response.images {
        assert!(image.path.is_none());
        let url = image.url.as_deref().unwrap();
        assert!(url.starts_with("https://cdn.test/users/u1/generated/"));
    }
    assert_eq!(
        h.store.published.lock().unwrap().len(),
        response.images.len()
    );
}
