use clap::Parser;
use keylight_programs::registry;
use tracing::info;

mod audio;
mod input;
mod overlay;
mod runner;
mod video;

/// Host runner for the handheld bring-up diagnostics.
#[derive(Parser)]
#[command(name = "keylight")]
struct Args {
    /// Diagnostic program to run (see --list).
    program: Option<String>,

    /// Window scale factor.
    #[arg(long, default_value_t = 3)]
    scale: u32,

    /// List available programs and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list {
        for entry in registry::all() {
            println!("{:<12} {}", entry.name, entry.title);
        }
        return;
    }

    let Some(name) = args.program.as_deref() else {
        eprintln!("Usage: keylight <program> [--scale N]  (or --list)");
        std::process::exit(2);
    };

    let entry = registry::find(name).unwrap_or_else(|| {
        let names: Vec<_> = registry::all().iter().map(|e| e.name).collect();
        eprintln!("Unknown program: {name}");
        eprintln!("Available: {}", names.join(", "));
        std::process::exit(1);
    });

    info!(program = entry.name, "starting");
    let program = (entry.create)();
    runner::run(program, entry.title, args.scale);
}
