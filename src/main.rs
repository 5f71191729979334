//! Vigil - Main Entry Point
//!
//! Command-line front end for the detection engine. Each subcommand runs one
//! operation and prints its result as JSON on stdout.

use std::env;
use std::sync::Arc;

use tracing::info;

use vigil::engine::scoring::security_status;
use vigil::engine::simulation::simulated_threat_batch;
use vigil::logging::init_logging;
use vigil::{
    scan_app_installation, scan_file, scan_url, ScanOptions, ScanSession, ThreatRecord,
    UniversalSchemeProber,
};

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_progress(progress: &vigil::ScanProgress) {
    eprintln!(
        "[{:>3}%] {} ({}/{})",
        progress.progress, progress.current_item, progress.items_scanned, progress.total_items
    );
}

async fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let session = ScanSession::new(Arc::new(UniversalSchemeProber), ScanOptions::default());

    match args.first().map(|s| s.as_str()) {
        Some("url") => {
            let url = args.get(1).ok_or("usage: vigil url <url>")?;
            print_json(&scan_url(url))?;
        }
        Some("file") => {
            let name = args.get(1).ok_or("usage: vigil file <name> [path]")?;
            print_json(&scan_file(name, args.get(2).map(|s| s.as_str())))?;
        }
        Some("app") => {
            let name = args.get(1).ok_or("usage: vigil app <name> [package]")?;
            print_json(&scan_app_installation(name, args.get(2).map(|s| s.as_str())))?;
        }
        Some("quick") => {
            let result = session.perform_quick_scan(|p| print_progress(&p)).await?;
            print_json(&result)?;
        }
        Some("full") => {
            let result = session.perform_full_scan(|p| print_progress(&p)).await?;
            print_json(&result)?;
        }
        Some("status") => {
            let threats: Vec<ThreatRecord> = if args.get(1).map(|s| s.as_str()) == Some("--demo") {
                let mut rng = rand::thread_rng();
                simulated_threat_batch(&mut rng)
                    .into_iter()
                    .map(ThreatRecord::finalize)
                    .collect()
            } else {
                Vec::new()
            };
            print_json(&security_status(&threats))?;
        }
        _ => {
            eprintln!("usage: vigil <url|file|app|quick|full|status> [args]");
            eprintln!("  url <url>             scan a URL");
            eprintln!("  file <name> [path]    scan a file name");
            eprintln!("  app <name> [package]  scan an app identity");
            eprintln!("  quick                 run a quick scan");
            eprintln!("  full                  run a full system scan");
            eprintln!("  status [--demo]       print the security status");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn main() {
    let _guard = init_logging();
    info!("Vigil starting...");

    let args: Vec<String> = env::args().skip(1).collect();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(&args)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
