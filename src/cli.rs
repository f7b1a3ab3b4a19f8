#![allow(clippy::missing_errors_doc)]

use clap::{Parser, ValueEnum};

use crate::{data::forecast::DEFAULT_PAGE_SIZE, domain::city::CityKey};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CityArg {
    Seoul,
    Daegu,
    Busan,
}

impl From<CityArg> for CityKey {
    fn from(arg: CityArg) -> Self {
        match arg {
            CityArg::Seoul => CityKey::Seoul,
            CityArg::Daegu => CityKey::Daegu,
            CityArg::Busan => CityKey::Busan,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "kma-weather",
    version,
    about = "Short-range forecasts for Seoul, Daegu and Busan"
)]
pub struct Cli {
    /// City whose hourly forecast is shown
    #[arg(value_enum, default_value_t = CityArg::Seoul)]
    pub city: CityArg,

    /// Data portal service key (decoded form)
    #[arg(long, env = "KMA_SERVICE_KEY", hide_env_values = true)]
    pub service_key: String,

    /// Override the forecast endpoint
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Rows requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 300)]
    pub refresh_interval: u64,

    /// Clock tick in seconds for re-selecting the current hour
    #[arg(long, default_value_t = 1)]
    pub clock_interval: u64,

    /// Fetch once, print the forecast and exit
    #[arg(long)]
    pub one_shot: bool,

    /// Print JSON instead of text (with --one-shot)
    #[arg(long, requires = "one_shot")]
    pub json: bool,
}

impl Cli {
    #[must_use]
    pub fn selected_city(&self) -> CityKey {
        self.city.into()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.service_key.trim().is_empty() {
            anyhow::bail!("--service-key must not be empty");
        }
        if self.page_size == 0 {
            anyhow::bail!("--page-size must be at least 1");
        }
        if self.refresh_interval == 0 || self.clock_interval == 0 {
            anyhow::bail!("--refresh-interval and --clock-interval must be positive");
        }
        Ok(())
    }
}
