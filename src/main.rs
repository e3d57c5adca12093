// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runlog command-line tool.

use anyhow::Context;
use clap::{Parser, Subcommand};
use runlog_tracker::{
    config::Config,
    db::{FileStore, RunDb},
    models::{ProfileStats, RankMode},
    services::{OpenMeteoClient, RankingEngine, WeatherLookup},
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "runlog")]
#[command(about = "Inspect a running log data file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print per-profile stats and rankings as JSON (default)
    Report,
    /// Look up the current weather at a position
    Weather {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Report) {
        Command::Report => report(&config),
        Command::Weather { lat, lon } => weather(&config, lat, lon).await,
    }
}

#[derive(Serialize)]
struct ProfileReport {
    id: i64,
    name: String,
    stats: ProfileStats,
}

fn report(config: &Config) -> anyhow::Result<()> {
    tracing::info!(path = %config.data_path.display(), "Building report");
    let store = FileStore::open(&config.data_path)?;
    let db = RunDb::new(Arc::new(store));
    let engine = RankingEngine::load(&db)?;

    let profiles: Vec<ProfileReport> = engine
        .profiles()
        .iter()
        .map(|p| ProfileReport {
            id: p.profile.id,
            name: p.profile.name.clone(),
            stats: ProfileStats::from_store(
                &p.records,
                engine.rank_of(p.profile.id, RankMode::Time),
            ),
        })
        .collect();

    let body = serde_json::json!({
        "team_total_km": engine.team_total_distance(),
        "profiles": profiles,
        "ranking_by_time": engine.rank(RankMode::Time),
        "ranking_by_distance": engine.rank(RankMode::Distance),
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn weather(config: &Config, lat: f64, lon: f64) -> anyhow::Result<()> {
    let client = OpenMeteoClient::new(&config.weather_url);
    let report = client.current(lat, lon).await?;
    let condition = report.condition();
    tracing::info!(lat, lon, temperature = report.temperature, ?condition, "Weather fetched");
    println!(
        "{} {:?} {:.1}°C",
        condition.icon(),
        condition,
        report.temperature
    );
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("runlog_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
