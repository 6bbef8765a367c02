use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blossoms::constants::*;
use blossoms::document::Document;
use blossoms::{Config, PageVariant, Runner, SimDocument};

#[cfg(feature = "preview")]
mod preview;

/// Runs a Blossoms page against a simulated document.
#[derive(Parser, Debug)]
#[command(name = "blossoms", version)]
struct Cli {
    /// Page markup file (TOML)
    page: PathBuf,

    /// Config file (TOML); stock timings when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the page variant from the config
    #[arg(long, value_enum)]
    variant: Option<PageVariant>,

    /// Simulated time to run headless (ms)
    #[arg(short, long, default_value_t = 8000)]
    duration: u64,

    /// Scroll position reached by the end of the run (px)
    #[arg(long)]
    scroll_to: Option<f32>,

    /// Element id to click after the run; repeatable
    #[arg(long = "click", value_name = "ID")]
    clicks: Vec<String>,

    /// Seed for the intro particles
    #[arg(long)]
    seed: Option<u64>,

    /// Open a window instead of running headless
    #[cfg(feature = "preview")]
    #[arg(long)]
    preview: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    if let Some(seed) = cli.seed {
        config.intro.seed = Some(seed);
    }

    // --- Load Page ---
    let doc = SimDocument::load(&cli.page)?;
    info!(page = %cli.page.display(), elements = doc.elements().len(), variant = ?config.variant, "page markup loaded");

    let runner = Runner::new(doc, &config);
    launch(runner, &cli)
}

#[cfg(feature = "preview")]
fn launch(runner: Runner, cli: &Cli) -> Result<()> {
    if cli.preview {
        return preview::run(runner);
    }
    run_headless(runner, cli);
    Ok(())
}

#[cfg(not(feature = "preview"))]
fn launch(runner: Runner, cli: &Cli) -> Result<()> {
    run_headless(runner, cli);
    Ok(())
}

fn run_headless(mut runner: Runner, cli: &Cli) {
    let frames = ((cli.duration as f32 / 1000.0) / FRAME_TIME).ceil().max(1.0) as u32;
    let scroll_step = cli.scroll_to.map(|y| y / frames as f32);

    // --- Main Loop ---
    for _ in 0..frames {
        runner.step(FRAME_TIME);
        if let Some(step) = scroll_step {
            runner.scroll_by(step);
        }
    }
    runner.run_to(cli.duration);

    for id in &cli.clicks {
        if !runner.click_id(id) {
            info!(%id, "no element to click");
        }
    }

    print_report(&runner);
}

fn print_report(runner: &Runner) {
    let page = runner.page();
    let doc = runner.doc();

    println!("t = {} ms, scroll = {} px", page.now_ms(), doc.scroll_y());
    if let Some(intro) = page.intro() {
        println!("intro: {:?}, {} particles in flight", intro.scene(), intro.particles().len());
    }
    if !page.carousel().is_empty() {
        println!("carousel: slide {} of {}", page.carousel().current_index() + 1, page.carousel().len());
    }
    if let Some(stack) = page.card_stack() {
        println!("card stack: card {} of {}", stack.active_index() + 1, stack.cards().len());
    }
    if let Some(calendar) = page.calendar() {
        println!("calendar: {}", calendar.selected().unwrap_or("-"));
    }
    println!("pending timers: {}", page.timers().pending());
    println!();

    for el in doc.elements() {
        let Some(node) = doc.node(el) else { continue };
        if node.classes.iter().any(|c| c == PARTICLE_CLASS) {
            continue;
        }
        let label = match doc.attribute(el, "id") {
            Some(id) => format!("{}#{}", node.tag, id),
            None if !node.classes.is_empty() => format!("{}.{}", node.tag, node.classes[0]),
            None => continue,
        };
        let styles: Vec<String> = node.styles.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        println!("{label:<36} [{}] {}", node.classes.join(" "), styles.join("; "));
    }
}
