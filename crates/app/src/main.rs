use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use bookconnect_application::CatalogSession;
use bookconnect_core::{Catalog, Settings};
use bookconnect_storage::Storage;
use bookconnect_ui::Ui;
use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dirs =
        ProjectDirs::from("dev", "bookconnect", "bookconnect").context("resolve project dirs")?;

    let storage = Storage::open(project_dirs.config_dir())?;
    init_logging(&storage.log_path())?;

    let settings = storage.load_settings()?;
    let page_size = settings.page_size()?;
    let catalog_arg = std::env::args().nth(1).map(PathBuf::from);
    let catalog = load_catalog(&settings, catalog_arg.as_deref())?;

    let system_prefers_dark = system_prefers_dark();
    tracing::info!(
        books = catalog.len(),
        page_size = page_size.get(),
        ?system_prefers_dark,
        "starting"
    );

    let session = CatalogSession::new(Arc::new(catalog), page_size, system_prefers_dark)
        .with_theme_choice(settings.theme);
    let mut ui = Ui::new(session);
    ui.run()
}

/// The command-line path wins over the configured one; with neither, the
/// bundled sample catalog is used.
fn load_catalog(settings: &Settings, arg: Option<&Path>) -> anyhow::Result<Catalog> {
    let configured = settings.catalog_path.as_deref().map(Path::new);
    match arg.or(configured) {
        Some(path) => bookconnect_storage::load_catalog(path),
        None => bookconnect_storage::bundled_catalog(),
    }
}

fn init_logging(log_path: &Path) -> anyhow::Result<()> {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

/// Reads the `COLORFGBG` convention (`"fg;bg"`); backgrounds 0-6 and 8 are dark.
fn system_prefers_dark() -> Option<bool> {
    let value = std::env::var("COLORFGBG").ok()?;
    parse_colorfgbg(&value)
}

fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}
