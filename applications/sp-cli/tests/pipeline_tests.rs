//! End-to-end batch pipeline tests
//!
//! Each test generates wav fixtures and a pass-through effect manifest,
//! runs the whole batch, and checks the finalizer invariant: exactly one of
//! {temp artifact, output artifact} exists afterwards.


use sp_cli::{run, PipelineError, RunConfig, DEFAULT_SAMPLE_RATE_HZ};
use std::path::{Path, PathBuf};
use test_helpers::{sample_peak_dbfs, write_gain_manifest, write_sine_wav_f32, write_sine_wav_i16};

fn config(inputs: Vec<PathBuf>, plugin_path: PathBuf) -> RunConfig {
    RunConfig {
        inputs,
        plugin_path,
        plugin_parameters: serde_json::Map::new(),
        sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
        output_dir: None,
        target_peak_db: sp_loudness::DEFAULT_TARGET_PEAK_DB,
    }
}

fn artifact_paths(input: &Path) -> (PathBuf, PathBuf) {
    let dir = input.parent().unwrap();
    let name = input.file_name().unwrap().to_str().unwrap();
    (
        dir.join(format!("temp-{name}")),
        dir.join(format!("sp-{name}")),
    )
}

#[test]
fn test_quiet_file_is_amplified_to_target() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("quiet.wav");
    write_sine_wav_i16(&input, 0.25, 44100, 44100).unwrap();
    let plugin = write_gain_manifest(dir.path());

    run(&config(vec![input.clone()], plugin)).unwrap();

    let (temp, output) = artifact_paths(&input);
    assert!(!temp.exists());
    assert!(output.exists());

    // A -12 dBFS peak should land within rounding distance of -0.5 dBFS
    let peak = sample_peak_dbfs(&output);
    assert!(
        (peak - (-0.5)).abs() < 0.15,
        "Expected peak near -0.5 dBFS, got {:.2}",
        peak
    );
}

#[test]
fn test_loud_file_is_renamed_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("loud.wav");
    // Peak around -0.09 dBFS: louder than the -0.5 target, not full scale
    write_sine_wav_f32(&input, 0.99, 44100, 44100).unwrap();
    let plugin = write_gain_manifest(dir.path());

    run(&config(vec![input.clone()], plugin)).unwrap();

    let (temp, output) = artifact_paths(&input);
    assert!(!temp.exists());
    assert!(output.exists());

    // Renamed as-is, no gain applied
    let peak = sample_peak_dbfs(&output);
    let input_peak = sample_peak_dbfs(&input);
    assert!((peak - input_peak).abs() < 0.05);
}

#[test]
fn test_full_scale_file_passes_through_with_warning_branch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clipped.wav");

    // Literal full-scale samples so the peak is exactly 0 dBFS
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&input, spec).unwrap();
    for i in 0..4410 {
        let s = if i % 100 == 0 { 1.0_f32 } else { 0.3 };
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();

    let plugin = write_gain_manifest(dir.path());
    run(&config(vec![input.clone()], plugin)).unwrap();

    let (temp, output) = artifact_paths(&input);
    assert!(!temp.exists());
    assert!(output.exists());

    // Still at full scale: the exact branch renames without amplifying
    let peak = sample_peak_dbfs(&output);
    assert!(peak.abs() < 0.01, "Expected 0 dBFS, got {:.3}", peak);
}

#[test]
fn test_batch_processes_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");
    write_sine_wav_i16(&a, 0.25, 44100, 22050).unwrap();
    write_sine_wav_i16(&b, 0.25, 44100, 22050).unwrap();
    let plugin = write_gain_manifest(dir.path());

    run(&config(vec![a.clone(), b.clone()], plugin)).unwrap();

    for input in [&a, &b] {
        let (temp, output) = artifact_paths(input);
        assert!(!temp.exists());
        assert!(output.exists());
        // Inputs are never touched
        assert!(input.exists());
    }
}

#[test]
fn test_resampling_to_configured_rate() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hires.wav");
    write_sine_wav_i16(&input, 0.25, 48000, 48000).unwrap();
    let plugin = write_gain_manifest(dir.path());

    run(&config(vec![input.clone()], plugin)).unwrap();

    let (_, output) = artifact_paths(&input);
    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().sample_rate, 44100);
}

#[test]
fn test_unknown_parameter_aborts_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("track.wav");
    write_sine_wav_i16(&input, 0.25, 44100, 4410).unwrap();
    let plugin = write_gain_manifest(dir.path());

    let mut cfg = config(vec![input.clone()], plugin);
    cfg.plugin_parameters
        .insert("wet".to_string(), serde_json::json!(0.5));

    match run(&cfg) {
        Err(PipelineError::UnknownParameter { key, valid }) => {
            assert_eq!(key, "wet");
            assert_eq!(valid, vec!["gain_db".to_string()]);
        }
        other => panic!("Expected UnknownParameter, got {:?}", other.err()),
    }

    // Nothing was processed
    let (temp, output) = artifact_paths(&input);
    assert!(!temp.exists());
    assert!(!output.exists());
}

#[test]
fn test_collision_aborts_with_zero_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");
    write_sine_wav_i16(&a, 0.25, 44100, 4410).unwrap();
    write_sine_wav_i16(&b, 0.25, 44100, 4410).unwrap();
    std::fs::write(dir.path().join("sp-b.wav"), b"stale").unwrap();
    let plugin = write_gain_manifest(dir.path());

    assert!(matches!(
        run(&config(vec![a.clone(), b], plugin)),
        Err(PipelineError::ArtifactCollision(_))
    ));

    // The first file was never processed even though it was itself valid
    let (temp_a, output_a) = artifact_paths(&a);
    assert!(!temp_a.exists());
    assert!(!output_a.exists());
}

#[test]
fn test_midbatch_failure_keeps_earlier_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");
    write_sine_wav_i16(&a, 0.25, 44100, 4410).unwrap();
    // Right extension, not a wav: passes validation, fails at decode
    std::fs::write(&b, b"definitely not audio").unwrap();
    let plugin = write_gain_manifest(dir.path());

    let result = run(&config(vec![a.clone(), b.clone()], plugin));
    assert!(matches!(result, Err(PipelineError::Audio(_))));

    // The first item was finalized before the failure and stays intact
    let (temp_a, output_a) = artifact_paths(&a);
    assert!(!temp_a.exists());
    assert!(output_a.exists());

    // The failing item produced nothing
    let (_, output_b) = artifact_paths(&b);
    assert!(!output_b.exists());
}

#[test]
fn test_midbatch_failure_leaves_failing_temp_for_inspection() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("silent.wav");
    write_sine_wav_i16(&a, 0.25, 44100, 4410).unwrap();
    // Decodes and processes fine, but has no measurable peak
    write_sine_wav_i16(&b, 0.0, 44100, 4410).unwrap();
    let plugin = write_gain_manifest(dir.path());

    let result = run(&config(vec![a.clone(), b.clone()], plugin));
    assert!(matches!(result, Err(PipelineError::Analysis(_))));

    let (temp_a, output_a) = artifact_paths(&a);
    assert!(!temp_a.exists());
    assert!(output_a.exists());

    // The failure struck after the temp artifact was written; it stays on
    // disk and no output was finalized for it
    let (temp_b, output_b) = artifact_paths(&b);
    assert!(temp_b.exists());
    assert!(!output_b.exists());
}

#[test]
fn test_missing_plugin_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("track.wav");
    write_sine_wav_i16(&input, 0.25, 44100, 4410).unwrap();

    let cfg = config(vec![input], dir.path().join("missing.vst3"));
    assert!(matches!(run(&cfg), Err(PipelineError::PluginMissing(_))));
}

#[test]
fn test_effect_parameters_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("track.wav");
    write_sine_wav_f32(&input, 0.25, 44100, 44100).unwrap();
    let plugin = write_gain_manifest(dir.path());

    // Attenuate by 12 dB before normalization; the pipeline should still
    // bring the peak back up to the target afterwards
    let mut cfg = config(vec![input.clone()], plugin);
    cfg.plugin_parameters
        .insert("gain_db".to_string(), serde_json::json!("-12.0"));

    run(&cfg).unwrap();

    let (_, output) = artifact_paths(&input);
    let peak = sample_peak_dbfs(&output);
    assert!(
        (peak - (-0.5)).abs() < 0.15,
        "Expected peak near -0.5 dBFS, got {:.2}",
        peak
    );
}
