use clap::Parser;

use grant_graph::app::GrantGraphApp;
use grant_graph::config::Config;
use grant_graph::telemetry;

fn main() -> eframe::Result<()> {
    let config = Config::parse();
    telemetry::init_tracing(&config.log_level);
    tracing::info!(data = %config.data, locale = ?config.locale, "starting grant-graph");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "grant-graph",
        options,
        Box::new(move |cc| Ok(Box::new(GrantGraphApp::new(cc, config)))),
    )
}
