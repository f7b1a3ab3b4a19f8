pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod resilience;
pub mod ui;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result, bail};
use app::{
    events::AppEvent,
    state::{AppMode, AppState},
};
use chrono::Local;
use cli::Cli;
use data::forecast::{BaseSlot, FetchOutcome};
use domain::city::CITIES;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing();
    cli.validate()?;
    if cli.one_shot {
        return run_one_shot(&cli).await;
    }

    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let mut app = AppState::new(&cli)?;

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                app.handle_event(AppEvent::Quit, &tx, &cli).await?;
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        if app.take_dirty() {
            print!("{}", ui::render_report(&app));
        }

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

async fn run_one_shot(cli: &Cli) -> Result<()> {
    let app = fetch_all_once(cli).await?;

    if cli.json {
        let payload = serde_json::to_string_pretty(&ui::json_report(&app))
            .context("serializing forecast report failed")?;
        println!("{payload}");
    } else {
        print!("{}", ui::render_report(&app));
    }
    Ok(())
}

/// Fetches every city once, in order. A failed city is logged and skipped; only a run
/// where every fetch failed is an error.
pub async fn fetch_all_once(cli: &Cli) -> Result<AppState> {
    let mut app = AppState::new(cli)?;
    app.now = Local::now().naive_local();
    let base = BaseSlot::daily(app.now.date());
    let mut failed = Vec::new();

    for city in &CITIES {
        let ticket = app.fence.issue(city.key);
        match app.client().fetch(city, &base).await {
            Ok(FetchOutcome::Forecast(observations)) => {
                app.apply_forecast(city.key, ticket, &observations);
            }
            Ok(FetchOutcome::Rejected { code, message }) => {
                tracing::debug!(
                    city = city.display_name,
                    %code,
                    %message,
                    "provider result code is not success, skipping city"
                );
            }
            Err(error) => {
                app.handle_fetch_failed(city.key, ticket, &error);
                failed.push(format!("{}: {error}", city.display_name));
            }
        }
    }

    if failed.len() == CITIES.len() {
        bail!("every forecast fetch failed ({})", failed.join("; "));
    }
    Ok(app)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
