//! End-to-end generation tests against the mock model backend.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use auralis::config::AppConfig;
use auralis::error::ErrorCode;
use auralis::generation::generate;
use auralis::model::{FailingModel, MockModel, ModelHandle, MOCK_SAMPLE_RATE};

fn test_config(tmp: &tempfile::TempDir) -> AppConfig {
    AppConfig::with_dirs(tmp.path().join("generated"), tmp.path().join("tracks"))
}

fn mock_handle() -> (ModelHandle, Arc<auralis::model::MockStats>) {
    let model = MockModel::new();
    let stats = model.stats();
    (ModelHandle::new(Box::new(model)), stats)
}

#[test]
fn generation_writes_playable_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let (model, _) = mock_handle();

    let artifact = generate(&model, &config, "calm piano", 10).unwrap();

    assert!(artifact.path.exists());
    assert!(std::fs::metadata(&artifact.path).unwrap().len() > 0);
    assert_eq!(artifact.sample_rate, MOCK_SAMPLE_RATE);
    assert_eq!(artifact.duration_sec, 10);

    let name = artifact.path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("generated_"), "unexpected name: {}", name);
    assert!(name.ends_with(".wav"), "unexpected name: {}", name);

    // The written file decodes at the model's sample rate with the
    // requested duration.
    let reader = hound::WavReader::open(&artifact.path).unwrap();
    assert_eq!(reader.spec().sample_rate, MOCK_SAMPLE_RATE);
    assert_eq!(reader.len(), 10 * MOCK_SAMPLE_RATE);
}

#[test]
fn blank_prompt_never_reaches_the_model() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let (model, stats) = mock_handle();

    for prompt in ["", "   ", "\n\t"] {
        let err = generate(&model, &config, prompt, 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrompt);
    }

    assert_eq!(stats.generate_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn off_menu_duration_never_reaches_the_model() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let (model, stats) = mock_handle();

    let err = generate(&model, &config, "calm piano", 25).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidDuration);
    assert_eq!(stats.generate_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn back_to_back_generations_never_collide() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let (model, _) = mock_handle();

    // The mock returns instantly, so these complete within the same
    // second and would collide on a purely timestamp-based name.
    let first = generate(&model, &config, "calm piano", 10).unwrap();
    let second = generate(&model, &config, "calm piano", 10).unwrap();

    assert_ne!(first.path, second.path);
    assert!(first.path.exists());
    assert!(second.path.exists());
}

#[test]
fn overlapping_requests_keep_their_own_duration() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let model = Arc::new(ModelHandle::new(Box::new(MockModel::with_latency(
        Duration::from_millis(50),
    ))));

    let handles: Vec<_> = [(10u32, "calm piano"), (30u32, "heavy drums")]
        .into_iter()
        .map(|(duration, prompt)| {
            let model = Arc::clone(&model);
            let config = config.clone();
            std::thread::spawn(move || generate(&model, &config, prompt, duration).unwrap())
        })
        .collect();

    for (handle, expected_duration) in handles.into_iter().zip([10u32, 30u32]) {
        let artifact = handle.join().unwrap();
        let reader = hound::WavReader::open(&artifact.path).unwrap();
        // Configure-then-generate is atomic under the handle's lock, so
        // each output is sized for its own request.
        assert_eq!(
            reader.len(),
            expected_duration * MOCK_SAMPLE_RATE,
            "duration {} leaked into another request",
            expected_duration
        );
    }
}

#[test]
fn model_failure_surfaces_as_typed_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let model = ModelHandle::new(Box::new(FailingModel));

    let err = generate(&model, &config, "calm piano", 10).unwrap_err();
    assert_eq!(err.code, ErrorCode::GenerationFailed);

    // Nothing was written for the failed request.
    let entries: Vec<_> = std::fs::read_dir(&config.generated_dir)
        .unwrap()
        .collect();
    assert!(entries.is_empty());
}

#[test]
fn missing_output_dir_is_created_on_demand() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig::with_dirs(
        tmp.path().join("deeply").join("nested").join("out"),
        tmp.path().join("tracks"),
    );
    let (model, _) = mock_handle();

    let artifact = generate(&model, &config, "calm piano", 10).unwrap();
    assert!(artifact.path.starts_with(&config.generated_dir));
    assert!(artifact.path.exists());
}
