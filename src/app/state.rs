use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use tokio::sync::mpsc;

use crate::{
    app::events::{AppEvent, start_clock_task, start_refresh_task},
    cli::Cli,
    data::forecast::{BaseSlot, FetchError, FetchOutcome, KmaClient},
    domain::{
        city::{CITIES, CityKey},
        forecast::{ForecastSnapshot, RawObservation},
    },
    resilience::{fence::RequestFence, freshness::RefreshMetadata},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug, Clone)]
pub struct CityWeather {
    pub snapshot: ForecastSnapshot,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub selected_city: CityKey,
    pub cities: BTreeMap<CityKey, CityWeather>,
    pub now: NaiveDateTime,
    pub refresh_meta: RefreshMetadata,
    pub fence: RequestFence,
    pub last_error: Option<String>,
    dirty: bool,
    client: KmaClient,
}

impl AppState {
    pub fn new(cli: &Cli) -> Result<Self> {
        let client = match &cli.forecast_url {
            Some(url) => KmaClient::with_base_url(url.clone(), cli.service_key.clone())?,
            None => KmaClient::new(cli.service_key.clone())?,
        };
        Ok(Self::with_client(cli, client.page_size(cli.page_size)))
    }

    #[must_use]
    pub fn with_client(cli: &Cli, client: KmaClient) -> Self {
        Self {
            mode: AppMode::Loading,
            running: true,
            selected_city: cli.selected_city(),
            cities: BTreeMap::new(),
            now: Local::now().naive_local(),
            refresh_meta: RefreshMetadata::default(),
            fence: RequestFence::new(),
            last_error: None,
            dirty: false,
            client,
        }
    }

    #[must_use]
    pub fn client(&self) -> &KmaClient {
        &self.client
    }

    #[must_use]
    pub fn selected_weather(&self) -> Option<&CityWeather> {
        self.cities.get(&self.selected_city)
    }

    /// Whether anything visible changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                start_clock_task(tx.clone(), cli.clock_interval);
                start_refresh_task(tx.clone(), cli.refresh_interval);
                self.start_fetch_all(tx);
            }
            AppEvent::TickClock(now) => self.handle_tick_clock(now),
            AppEvent::TickRefresh => self.start_fetch_all(tx),
            AppEvent::SelectCity(city) => {
                self.selected_city = city;
                self.dirty = true;
                self.start_fetch(tx, city);
            }
            AppEvent::FetchSucceeded {
                city,
                ticket,
                observations,
            } => {
                self.apply_forecast(city, ticket, &observations);
            }
            AppEvent::FetchRejected {
                city,
                ticket,
                code,
                message,
            } => {
                tracing::debug!(
                    city = city.as_str(),
                    ticket,
                    %code,
                    %message,
                    "provider result code is not success, keeping current data"
                );
            }
            AppEvent::FetchFailed {
                city,
                ticket,
                error,
            } => self.handle_fetch_failed(city, ticket, &error),
            AppEvent::Quit => self.mode = AppMode::Quit,
        }

        Ok(())
    }

    pub(crate) fn start_fetch_all(&mut self, tx: &mpsc::Sender<AppEvent>) {
        for city in &CITIES {
            self.start_fetch(tx, city.key);
        }
    }

    pub(crate) fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>, city: CityKey) {
        let ticket = self.fence.issue(city);
        let base = BaseSlot::daily(self.now.date());
        tracing::debug!(city = city.as_str(), ticket, base_date = %base.date, "fetching forecast");

        let client = self.client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch(city.city(), &base).await {
                Ok(FetchOutcome::Forecast(observations)) => AppEvent::FetchSucceeded {
                    city,
                    ticket,
                    observations,
                },
                Ok(FetchOutcome::Rejected { code, message }) => AppEvent::FetchRejected {
                    city,
                    ticket,
                    code,
                    message,
                },
                Err(error) => AppEvent::FetchFailed {
                    city,
                    ticket,
                    error,
                },
            };
            let _ = tx2.send(event).await;
        });
    }

    /// Runs the pipeline on a fetched payload and replaces the city's snapshot, unless a
    /// newer request for the city has already been applied.
    pub fn apply_forecast(
        &mut self,
        city: CityKey,
        ticket: u64,
        observations: &[RawObservation],
    ) -> bool {
        if !self.fence.accept(city, ticket) {
            tracing::debug!(city = city.as_str(), ticket, "dropping out-of-order forecast");
            return false;
        }

        let snapshot = ForecastSnapshot::build(observations, self.now);
        tracing::info!(
            city = city.as_str(),
            records = snapshot.records.len(),
            today = snapshot.buckets.today.len(),
            "forecast updated"
        );
        let fetched_at = Utc::now();
        self.cities.insert(
            city,
            CityWeather {
                snapshot,
                fetched_at,
            },
        );
        self.mode = AppMode::Ready;
        self.last_error = None;
        self.refresh_meta.mark_success(fetched_at);
        self.dirty = true;
        true
    }

    pub(crate) fn handle_tick_clock(&mut self, now: NaiveDateTime) {
        self.now = now;
        for weather in self.cities.values_mut() {
            if weather.snapshot.refresh_current(now) {
                self.dirty = true;
            }
        }
        self.refresh_meta.reevaluate(Utc::now());
    }

    pub(crate) fn handle_fetch_failed(&mut self, city: CityKey, ticket: u64, error: &FetchError) {
        tracing::warn!(city = city.as_str(), ticket, %error, "forecast fetch failed");
        self.last_error = Some(error.to_string());
        self.refresh_meta.mark_failure(Utc::now());
        if self.cities.is_empty() {
            self.mode = AppMode::Error;
        }
    }
}
