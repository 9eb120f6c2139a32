/// sp-it - re-sample, effect, and peak-normalize batches of .wav files
use clap::Parser;
use sp_cli::{RunConfig, DEFAULT_SAMPLE_RATE_HZ};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sp-it")]
#[command(version)]
#[command(
    about = "Each .wav audio file is re-sampled, processed with the effect, then normalized to at least -0.5dB."
)]
struct Cli {
    /// audio .wav file(s) to process (example: '/foo/bar.wav' '/baz/buz.wav')
    #[arg(long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// file path to VST effect (example: '/foo/bar/my-vst.vst3')
    #[arg(long)]
    vst: PathBuf,

    /// parameters for vst plugin in json format (example: '{"foo":"bar", "baz":"buz"}')
    #[arg(long, value_parser = parse_json_object)]
    vst_parameters: Option<serde_json::Map<String, serde_json::Value>>,

    /// sample rate for processing audio
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE_HZ)]
    sample_rate_hz: u32,

    /// output directory (default: same directory as input file(s))
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Parse `--vst-parameters` as a JSON object
fn parse_json_object(
    raw: &str,
) -> Result<serde_json::Map<String, serde_json::Value>, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, got {}", other)),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sp_cli=info,sp_audio=info,sp_loudness=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = RunConfig {
        inputs: cli.input,
        plugin_path: cli.vst,
        plugin_parameters: cli.vst_parameters.unwrap_or_default(),
        sample_rate_hz: cli.sample_rate_hz,
        output_dir: cli.output,
        target_peak_db: sp_loudness::DEFAULT_TARGET_PEAK_DB,
    };

    if let Err(err) = sp_cli::run(&config) {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
