use std::path::PathBuf;

use clap::Parser;
use flexi_logger::Logger;

use tangleview::app::TangleViewApp;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the entity snapshot exported by the data service.
    #[arg(long)]
    data: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str(&args.log_level)
        .and_then(Logger::start)
        .map_err(|error| eprintln!("logging unavailable: {error}"))
        .ok();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "tangleview",
        options,
        Box::new(move |cc| Ok(Box::new(TangleViewApp::new(cc, args.data.clone())))),
    )
}
