//! background-srcset replay tool.
//!
//! Drives one background-srcset component from a script of host activity and
//! prints every change notification with the CSS value applied at that point.
//!
//! ```text
//!  script.toml ──▶ replay::run
//!                    │
//!                    ├─▶ BackgroundSrcset ──▶ ConfigMerger ──▶ SourceResolver
//!                    │                                          │
//!                    └─▶ ScriptedHost (probe settlements) ◀─────┘
//!                                                               │
//!  stdout ◀── change events (url(...)) ◀────────────────────────┘
//! ```

use std::path::PathBuf;
use clap::Parser;

use background_srcset::config::{load_settings, Settings};
use background_srcset::observability::logging;
use background_srcset::replay::{self, Script};

#[derive(Parser)]
#[command(name = "background-srcset")]
#[command(about = "Replay host activity against a responsive background resolver", long_about = None)]
struct Cli {
    /// Script of input changes, lifecycle calls and probe settlements.
    #[arg(short, long)]
    script: PathBuf,

    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print events as JSON lines.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    logging::init(&settings.logging)?;

    tracing::info!(
        script = %cli.script.display(),
        grammar = ?settings.grammar.mode,
        property = %settings.style.property,
        "Replaying script"
    );

    let script = Script::load(&cli.script)?;
    let events = replay::run(&script, &settings).await?;

    for event in &events {
        if cli.json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("step {}: {}", event.step, event.background_image);
        }
    }

    tracing::info!(changes = events.len(), "Replay complete");
    Ok(())
}
