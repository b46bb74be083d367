#![forbid(unsafe_code)]

//! Landing page binary entry point.

use std::fs::File;
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use folio_core::event::Event;
use folio_landing::cli;
use folio_landing::showcase::PanelRegistry;
use folio_landing::{LandingModel, theme};
use folio_runtime::{Program, ProgramConfig, ProgramSimulator};
use tracing_subscriber::EnvFilter;

/// Send tracing output to `FOLIO_LOG_FILE`, if set. The terminal belongs to
/// the UI, so nothing is ever logged to stdout or stderr.
fn init_tracing() {
    let Ok(path) = std::env::var("FOLIO_LOG_FILE") else {
        return;
    };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: could not open log file {path}: {e}");
            return;
        }
    };
    let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let opts = cli::Opts::parse();
    init_tracing();

    let registry = match PanelRegistry::builtin() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Invalid panel configuration: {e}");
            process::exit(1);
        }
    };
    let classifier = opts.classifier();

    if opts.dump_view {
        let (width, height) = opts.snapshot.unwrap_or((120, 40));
        let mut model = LandingModel::new(registry, classifier, width, height);
        model.settle();
        match serde_json::to_string_pretty(&model.showcase_view()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize view: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if let Some((width, height)) = opts.snapshot {
        let mut sim = ProgramSimulator::new(LandingModel::new(registry, classifier, width, height));
        sim.init();
        sim.inject_event(Event::Resize { width, height });
        sim.model_mut().settle();
        println!("{}", sim.capture_frame(width, height).to_text());
        return;
    }

    let model = LandingModel::new(registry, classifier, 80, 24);
    let config = ProgramConfig::default()
        .with_mouse(opts.mouse)
        .with_background(theme::BG)
        .with_exit_after((opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)));
    match Program::new(model, config) {
        Ok(program) => {
            if let Err(e) = program.run() {
                eprintln!("Runtime error: {e}");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            process::exit(1);
        }
    }
}
