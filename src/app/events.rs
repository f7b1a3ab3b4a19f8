use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::{sync::mpsc::Sender, time::interval};

use crate::{
    data::forecast::FetchError,
    domain::{city::CityKey, forecast::RawObservation},
};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    /// Local wall-clock instant from the clock task.
    TickClock(NaiveDateTime),
    TickRefresh,
    SelectCity(CityKey),
    FetchSucceeded {
        city: CityKey,
        ticket: u64,
        observations: Vec<RawObservation>,
    },
    FetchRejected {
        city: CityKey,
        ticket: u64,
        code: String,
        message: String,
    },
    FetchFailed {
        city: CityKey,
        ticket: u64,
        error: FetchError,
    },
    Quit,
}

pub fn start_clock_task(tx: Sender<AppEvent>, clock_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(clock_secs.max(1)));
        loop {
            ticker.tick().await;
            let now = Local::now().naive_local();
            if tx.send(AppEvent::TickClock(now)).await.is_err() {
                break;
            }
        }
    });
}

pub fn start_refresh_task(tx: Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(refresh_secs.max(1)));
        // The first tick completes immediately; bootstrap already fetched.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}
