//! tariff-lab entry point: scenario loading, report printing, export and API wiring.

mod cli;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tariff_lab::io::export::{export_carbon, export_privacy, export_tariff};
use tariff_lab::runner::{ensure_valid, run_carbon, run_privacy, run_tariff};

use crate::cli::{Args, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tariff_lab=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let scenario = args.load_scenario()?;
    ensure_valid(&scenario)?;

    let command = args.command();
    let mut sections = Vec::new();
    let mut written = Vec::new();

    if command.includes(Command::Tariff) {
        let report = run_tariff(&scenario.tariff)?;
        if let Some(dir) = &args.export_dir {
            written.extend(export_tariff(dir, &report)?);
        }
        sections.push(report.to_string());
    }
    if command.includes(Command::Privacy) {
        let report = run_privacy(&scenario.privacy)?;
        if let Some(dir) = &args.export_dir {
            written.extend(export_privacy(dir, &report)?);
        }
        sections.push(report.to_string());
    }
    if command.includes(Command::Carbon) {
        let report = run_carbon(&scenario.carbon);
        if let Some(dir) = &args.export_dir {
            written.extend(export_carbon(dir, &report)?);
        }
        sections.push(report.to_string());
    }

    println!("{}", sections.join("\n\n"));
    if !written.is_empty() {
        info!(files = written.len(), "CSV export complete");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(tariff_lab::api::AppState { base: scenario });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(tariff_lab::api::serve(state, addr))?;
    }

    Ok(())
}
