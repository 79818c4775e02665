use checkout_rush::app::App;
use checkout_rush::{build_info, health};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(version = %build_info::version_string(), "checkout-rush");

    // `game --health` runs the startup diagnostics instead of the demo
    if std::env::args().any(|a| a == "--health") {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    let mut app = App::from_env();
    let scores = app.run();
    info!(?scores, "demo complete");

    Ok(())
}
