//! demo - scripted synthetic run of the targeting console
//!
//! Drives a chosen policy over the synthetic camera with a periodic fire
//! schedule and prints a run summary. With `--seed` the whole exercise is
//! reproducible.

use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sentry_console::ui::{Ui, UiMode};
use sentry_console::{
    BlobBackend, CameraConfig, CameraSource, ConsoleLoop, ConsoleRenderer, ExerciseBackend,
    IffPolicy, LoopSummary, OrderPolicy, Policy, PolicyKind, ScriptedInput, ShapeVocabulary,
    TrackPolicy,
};

const DEMO_CONFIDENCE_THRESHOLD: f32 = 0.35;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Policy to run (1 = track, 2 = friend/foe, 3 = order-constrained).
    #[arg(long, default_value_t = 3)]
    policy: u32,
    /// Number of synthetic frames.
    #[arg(long, default_value_t = 240)]
    frames: u64,
    /// Fire once every N frames (0 disables firing).
    #[arg(long, default_value_t = 24)]
    fire_every: usize,
    /// Deterministic seed for scenes and engagement orders.
    #[arg(long)]
    seed: Option<u64>,
    /// UI mode: auto, plain, or pretty.
    #[arg(long)]
    ui: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let kind = PolicyKind::from_menu_choice(args.policy)
        .ok_or_else(|| anyhow!("--policy must be 1, 2, or 3"))?;
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let mode = match args.ui.as_deref() {
        Some("plain") => UiMode::Plain,
        Some("pretty") => UiMode::Pretty,
        _ => UiMode::Auto,
    };
    let ui = Ui::new(mode, std::io::stderr().is_terminal());

    let stage = ui.stage("open capture");
    let mut source = CameraSource::new(CameraConfig {
        url: "stub://demo".to_string(),
        frame_limit: Some(args.frames),
        ..CameraConfig::default()
    })?;
    source.connect()?;
    stage.done();

    let mut policy = build_policy(kind, seed)?;
    let mut renderer = ConsoleRenderer::new();
    let mut input = ScriptedInput::firing_every(args.fire_every, args.frames as usize);

    let stage = ui.stage("run policy");
    let summary = ConsoleLoop::new(&mut source, policy.as_mut(), &mut renderer, &mut input)
        .with_poll_timeout(std::time::Duration::from_millis(0))
        .run()?;
    stage.done();

    print_summary(&summary, seed);
    Ok(())
}

fn build_policy(kind: PolicyKind, seed: u64) -> Result<Box<dyn Policy>> {
    Ok(match kind {
        PolicyKind::Track => Box::new(TrackPolicy::new(Box::new(BlobBackend::tracking()))),
        PolicyKind::FriendFoe => Box::new(IffPolicy::new(Box::new(BlobBackend::friend_foe()))),
        PolicyKind::OrderConstrained => {
            let vocab = ShapeVocabulary::new(vec![
                "circle".to_string(),
                "square".to_string(),
                "triangle".to_string(),
                "star".to_string(),
            ])?;
            let backend = ExerciseBackend::new(seed, vocab.len(), DEMO_CONFIDENCE_THRESHOLD);
            Box::new(OrderPolicy::new(
                Box::new(backend),
                vocab,
                StdRng::seed_from_u64(seed ^ 0x5EED),
            ))
        }
    })
}

fn print_summary(summary: &LoopSummary, seed: u64) {
    println!("demo summary:");
    println!("  seed: {}", seed);
    println!("  frames processed: {}", summary.frames);
    println!("  frames with lock: {}", summary.locked_frames);
    println!("  frames engageable: {}", summary.engageable_frames);
    println!("  triggers resolved: {}", summary.outcomes.total());
    println!("  targets eliminated: {}", summary.outcomes.eliminated);
    println!("  correct hits: {}", summary.outcomes.correct_hits);
    println!("  wrong hits: {}", summary.outcomes.wrong_hits);
    println!("  friendly fire refused: {}", summary.outcomes.friendly_refused);
    println!("  no-target triggers: {}", summary.outcomes.no_target);
    println!("next steps:");
    println!("  cargo run --bin demo -- --policy 2 --seed {}", seed);
    println!("  cargo run --bin sentry");
}
