use std::path::PathBuf;

use arboretum::app::{ArboretumApp, DataSource, LaunchOptions, ViewMode};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Insight dataset in JSON. The bundled sample is used when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ViewMode::Planar)]
    view: ViewMode,

    /// Fixed seed for layout jitter.
    #[arg(long)]
    seed: Option<u64>,

    /// Default filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("arboretum={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let launch = LaunchOptions {
        source: args.data.map_or(DataSource::Bundled, DataSource::File),
        view_mode: args.view,
        seed: args.seed,
    };
    tracing::info!(source = ?launch.source, view = launch.view_mode.label(), "starting arboretum");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "arboretum",
        options,
        Box::new(move |cc| Ok(Box::new(ArboretumApp::new(cc, launch)))),
    )
}
