pub mod audio;
pub mod catalog;
pub mod clean;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod llm;
pub mod prompt;
pub mod speaker;
pub mod transcode;
pub mod tts;

use anyhow::Context;
use cli::{Cli, Commands};
use std::time::Duration;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Synthesize(args) => synthesize(args),
        Commands::Check(args) => check(args),
        Commands::Finalize(args) => finalize(args),
        Commands::Preprocess(args) => preprocess(args),
        Commands::Catalog(args) => catalog_cmd(args),
        Commands::TestVoice(args) => test_voice(args),
        Commands::Config(args) => config_cmd(args),
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn generate(args: cli::GenerateArgs) -> anyhow::Result<()> {
    let config = config::Config::load().context("load config")?;

    let backend_name = args
        .backend
        .unwrap_or_else(|| config.generation.backend.clone());
    let backend = llm::provider::select_backend(&backend_name, &config)?;

    let csv_path = args.csv.unwrap_or_else(|| config.paths.raw_csv.clone());
    let mut writer = dataset::writer::DatasetWriter::open(&csv_path)?;

    let scenarios = catalog::all();
    let opts = dataset::BatchOptions {
        start_from_id: args.start_from_id,
        per_scenario: args.per_scenario.unwrap_or(config.generation.per_scenario),
        delay: Duration::from_millis(
            args.delay_ms.unwrap_or(config.generation.request_delay_ms),
        ),
    };

    tracing::info!(
        scenarios = scenarios.len(),
        per_scenario = opts.per_scenario,
        start_from_id = opts.start_from_id,
        backend = backend.name(),
        "starting dialogue generation"
    );

    let report = dataset::run_batch(backend.as_ref(), &mut writer, &scenarios, &opts)?;

    println!(
        "Attempted {} generations: {} written, {} failed ({})",
        report.attempted,
        report.written,
        report.failed,
        csv_path.display()
    );
    Ok(())
}

fn synthesize(args: cli::SynthesizeArgs) -> anyhow::Result<()> {
    let config = config::Config::load().context("load config")?;

    let backend_name = args
        .backend
        .unwrap_or_else(|| config.synthesis.backend.clone());
    let backend = tts::provider::select_backend(&backend_name, &config)?;

    let cache = build_clip_cache(&config)?;
    let csv_path = args.csv.unwrap_or_else(|| config.paths.raw_csv.clone());
    let audio_dir = args
        .audio_dir
        .unwrap_or_else(|| config.paths.audio_dir.clone());

    let stage = audio::SynthesisStage::new(backend.as_ref(), cache, &config.synthesis, &audio_dir);
    let report = stage.regenerate(&csv_path, config.synthesis.min_file_bytes)?;

    println!(
        "Good: {}  Quarantined: {}  Regenerated: {}  Failed: {}",
        report.already_good, report.quarantined, report.regenerated, report.failed
    );
    Ok(())
}

fn build_clip_cache(config: &config::Config) -> anyhow::Result<Option<tts::cache::ClipCache>> {
    if !config.cache.enabled {
        return Ok(None);
    }
    let dir = config.default_cache_dir()?;
    let (max_size_bytes, max_entries) = config.cache_limits();
    Ok(Some(tts::cache::ClipCache::new(
        dir,
        max_size_bytes,
        max_entries,
    )))
}

fn check(args: cli::CheckArgs) -> anyhow::Result<()> {
    let config = config::Config::load().context("load config")?;

    let csv_path = args.csv.unwrap_or_else(|| config.paths.raw_csv.clone());
    let audio_dir = args
        .audio_dir
        .unwrap_or_else(|| config.paths.audio_dir.clone());

    let ids = audio::dialog_ids(&csv_path)?;
    let report = audio::integrity::audit(&audio_dir, &ids, config.synthesis.min_file_bytes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Dialogues: {}", ids.len());
    println!("Good: {}", report.good.len());
    println!("Missing: {}", report.missing.len());
    println!("Corrupted: {}", report.corrupted.len());
    if report.is_complete() {
        println!("All audio files present and healthy.");
    }
    Ok(())
}

fn finalize(args: cli::FinalizeArgs) -> anyhow::Result<()> {
    let config = config::Config::load().context("load config")?;

    let input = args.input.unwrap_or_else(|| config.paths.raw_csv.clone());
    let output = args.output.unwrap_or_else(|| config.paths.final_csv.clone());
    let audio_dir = args
        .audio_dir
        .unwrap_or_else(|| config.paths.audio_dir.clone());

    let report = dataset::finalize::run(&input, &output, &audio_dir)?;

    println!("Wrote {} rows to {}", report.written, output.display());
    if report.skipped_missing > 0 {
        println!(
            "Skipped {} rows whose audio file was not found.",
            report.skipped_missing
        );
    }
    if report.skipped_invalid > 0 {
        println!("Skipped {} unparseable rows.", report.skipped_invalid);
    }
    Ok(())
}

fn preprocess(args: cli::PreprocessArgs) -> anyhow::Result<()> {
    let config = config::Config::load().context("load config")?;

    let audio_dir = args
        .audio_dir
        .unwrap_or_else(|| config.paths.audio_dir.clone());
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| config.paths.preprocessed_dir.clone());

    let report = transcode::preprocess_dir(&audio_dir, &out_dir)?;

    println!(
        "Converted {} files to 16 kHz mono ({} failed)",
        report.converted, report.failed
    );
    Ok(())
}

fn catalog_cmd(args: cli::CatalogArgs) -> anyhow::Result<()> {
    let scenarios = catalog::all();

    if args.json {
        let items: Vec<_> = scenarios
            .iter()
            .map(|s| {
                serde_json::json!({
                    "category": s.category,
                    "detail": s.detail,
                    "label": s.label.as_u8(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for scenario in &scenarios {
        println!(
            "[{}] {}: {}",
            scenario.label.name(),
            scenario.category,
            scenario.detail
        );
    }
    let (fraud, legit) = catalog::counts();
    println!("{fraud} fraud scenarios, {legit} legitimate scenarios");
    Ok(())
}

fn test_voice(args: cli::TestVoiceArgs) -> anyhow::Result<()> {
    let config = config::Config::load().context("load config")?;

    let backend_name = args
        .backend
        .unwrap_or_else(|| config.synthesis.backend.clone());
    let backend = tts::provider::select_backend(&backend_name, &config)?;

    let voices = speaker::VoiceMap::new(&config.synthesis.voices, &config.synthesis.default_voice);
    let voice = match (&args.voice, args.role) {
        (Some(voice), _) => voice.clone(),
        (None, Some(role)) => voices
            .lookup(role.as_str())
            .unwrap_or(voices.default_voice())
            .to_string(),
        (None, None) => voices.default_voice().to_string(),
    };

    let text = args
        .text
        .unwrap_or_else(|| "Halo, ini tes suara.".to_string());

    let clip = backend
        .synthesize(&text, &voice)
        .context("voice synthesis")?;
    std::fs::write(&args.output, &clip)
        .with_context(|| format!("write {}", args.output.display()))?;

    println!("Wrote {} ({} bytes, voice {voice})", args.output.display(), clip.len());
    Ok(())
}

fn config_cmd(args: cli::ConfigArgs) -> anyhow::Result<()> {
    if args.init {
        let path = config::Config::init_default()?;
        println!("Initialized config at {}", path.display());
        return Ok(());
    }

    if args.show {
        let config = config::Config::load()?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.validate {
        let config = config::Config::load()?;
        config.validate()?;
        println!("Config OK");
        return Ok(());
    }

    let path = config::Config::default_path()?;
    println!("{}", path.display());
    Ok(())
}
