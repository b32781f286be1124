mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use label_document::ObjectClass;
use label_editor::EditorSession;
use script::SessionScript;
use settings::SettingsStore;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Replay a 3D box annotation session and export its labels")]
struct Args {
    /// Session script (JSON) to replay
    script: PathBuf,

    /// Directory for the exported label file
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Settings file to use instead of the platform config location
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the export to stdout instead of writing a file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let settings_store = match &args.settings {
        Some(path) => SettingsStore::with_path(path),
        None => SettingsStore::new().context("settings store init failed")?,
    };
    let user_settings = settings_store.load_or_default();

    let script = SessionScript::load(&args.script)?;
    let mut session = EditorSession::new(user_settings, script.viewport_size());
    let consumed = script.replay(&mut session);
    info!(
        document = session.document().name(),
        id = %session.document().id(),
        steps = script.steps.len(),
        consumed,
        view = session.view().label(),
        "replayed session script"
    );

    let stats = session.stats();
    for class in ObjectClass::ALL {
        info!(class = class.label(), count = stats.count(class), "labels");
    }
    info!(total = stats.total(), "label totals");

    if args.dry_run {
        println!("{}", session.export_labels().context("label export failed")?);
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .or_else(|| session.settings().export.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = session
        .write_labels(&output_dir)
        .with_context(|| format!("failed to write labels into {}", output_dir.display()))?;
    info!(path = %path.display(), "labels written");
    Ok(())
}
