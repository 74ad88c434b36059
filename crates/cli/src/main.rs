mod config;

use anyhow::{Context, Result};
use clap::Parser;
use clients::{Credentials, OmdbResolver, SeerrSession};
use colored::Colorize;
use config::Cli;
use curator::{CategoryReport, RunReport, Services, SessionOrchestrator};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.default_filter())),
        )
        .init();

    let config = cli.curate_config().context("Invalid configuration")?;

    let session = Arc::new(
        SeerrSession::new(
            &cli.seerr_url,
            Credentials::new(cli.seerr_email.clone(), cli.seerr_password.clone()),
            Some(cli.http_timeout()),
        )
        .context("Failed to build Seerr client")?,
    );
    let resolver = Arc::new(
        OmdbResolver::new(cli.omdb_url.clone(), cli.omdb_api_key.clone(), Some(cli.http_timeout()))
            .context("Failed to build OMDb client")?,
    );
    if !resolver.has_api_key() {
        tracing::warn!("OMDB_API_KEY is empty; every rating will be unknown");
    }

    println!(
        "Curating {} per category from {} ({} mode){}",
        config.target_count,
        session.api_base(),
        config.feed_mode,
        if config.requests_enabled { "" } else { ", dry run" }
    );

    let mut orchestrator = SessionOrchestrator::new(config, Services::from_session(session, resolver));
    let report = orchestrator.run().await;

    print_report(&report);

    match report.fatal {
        Some(err) => Err(anyhow::Error::new(err).context("Curation aborted")),
        None => Ok(()),
    }
}

fn print_report(report: &RunReport) {
    if let Some(err) = &report.fatal {
        println!("{} {}", "✗".red(), err);
        return;
    }

    for category in &report.categories {
        print_category(category);
    }

    println!(
        "{} {} accepted, {} requested over {} pages",
        "✓".green(),
        report.total_accepted(),
        report.total_sent(),
        report.total_pages()
    );
}

fn print_category(report: &CategoryReport) {
    let label = report.category.to_string();
    let mut title = label[..1].to_uppercase();
    title.push_str(&label[1..]);
    println!(
        "\n{} {}/{} ({})",
        title.bold().blue(),
        report.items.len(),
        report.target,
        report.stop
    );

    for (rank, item) in report.items.iter().enumerate() {
        let rating = item
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!("{}. {} [{}]", (rank + 1).to_string().green(), item, rating.yellow());
    }

    let counts = &report.dispatch;
    if counts.skipped > 0 {
        println!("   {} not requested (dry run)", counts.skipped);
    } else {
        println!(
            "   {} requested, {} rejected",
            counts.accepted,
            if counts.rejected > 0 {
                counts.rejected.to_string().red()
            } else {
                counts.rejected.to_string().normal()
            }
        );
    }
    for failure in &report.failures {
        println!("   {} {}", "✗".red(), failure);
    }
}
