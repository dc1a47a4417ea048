//! sentry - interactive operator targeting console
//!
//! Presents the policy menu, opens the capture stream, and runs the chosen
//! engagement policy until the stream ends, the operator exits, or Ctrl-C.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::Rng;

use sentry_console::{
    BlobBackend, CameraSource, ConsoleConfig, ConsoleLoop, ConsoleRenderer, ExerciseBackend,
    IffPolicy, LoopSummary, OrderPolicy, Policy, PolicyKind, ShapeVocabulary, TerminalInput,
    TrackPolicy,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Operator Targeting Console");
    println!("Please select the policy you want to run:");
    println!("1. Single Target Elimination");
    println!("2. Friend/Foe Discrimination");
    println!("3. Elimination with Given Engagement");
    print!("Your selection (1-3): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("reading menu selection")?;
    let Some(kind) = line
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(PolicyKind::from_menu_choice)
    else {
        println!("Invalid selection.");
        return Ok(());
    };

    let cfg = ConsoleConfig::load()?;

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_handler = cancel.clone();
    ctrlc::set_handler(move || {
        cancel_handler.store(true, Ordering::Relaxed);
    })
    .context("installing Ctrl-C handler")?;

    let mut policy = build_policy(kind, &cfg)?;
    let mut source = CameraSource::new(cfg.camera.clone())?;
    source.connect()?;

    let mut renderer = ConsoleRenderer::new();
    let mut input = TerminalInput::new()?;

    let summary = ConsoleLoop::new(&mut source, policy.as_mut(), &mut renderer, &mut input)
        .with_cancel(cancel)
        .with_poll_timeout(cfg.poll_timeout)
        .run()?;
    drop(input); // restore the terminal before printing

    print_summary(&summary, &source);
    Ok(())
}

fn build_policy(kind: PolicyKind, cfg: &ConsoleConfig) -> Result<Box<dyn Policy>> {
    Ok(match kind {
        PolicyKind::Track => Box::new(TrackPolicy::new(Box::new(BlobBackend::tracking()))),
        PolicyKind::FriendFoe => Box::new(IffPolicy::new(Box::new(BlobBackend::friend_foe()))),
        PolicyKind::OrderConstrained => {
            // Missing or empty vocabulary aborts the run before any frame.
            let vocab = ShapeVocabulary::load(&cfg.detector.class_names)?;
            let seed: u64 = rand::thread_rng().gen();
            let backend = ExerciseBackend::new(
                seed,
                vocab.len(),
                cfg.detector.confidence_threshold,
            );
            Box::new(OrderPolicy::new(
                Box::new(backend),
                vocab,
                rand::thread_rng(),
            ))
        }
    })
}

fn print_summary(summary: &LoopSummary, source: &CameraSource) {
    let stats = source.stats();
    println!("run summary:");
    println!("  source: {}", stats.url);
    println!("  frames processed: {}", summary.frames);
    println!("  frames with lock: {}", summary.locked_frames);
    println!("  frames engageable: {}", summary.engageable_frames);
    println!("  triggers resolved: {}", summary.outcomes.total());
    println!("  targets eliminated: {}", summary.outcomes.eliminated);
    println!("  correct hits: {}", summary.outcomes.correct_hits);
    println!("  wrong hits: {}", summary.outcomes.wrong_hits);
    println!("  friendly fire refused: {}", summary.outcomes.friendly_refused);
    println!("  no-target triggers: {}", summary.outcomes.no_target);
}
