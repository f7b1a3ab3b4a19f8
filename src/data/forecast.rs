use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    city::City,
    dates::DayKeys,
    forecast::RawObservation,
};

const FORECAST_URL: &str =
    "https://apis.data.go.kr/1360000/VilageFcstInfoService_2.0/getVilageFcst";
const SUCCESS_CODE: &str = "00";
const ISSUANCE_TIME: &str = "2300";
pub const MAX_PAGES: u32 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("forecast request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("forecast request returned HTTP {0}")]
    Status(StatusCode),

    #[error("failed to decode forecast payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What the provider answered for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Forecast(Vec<RawObservation>),
    /// The envelope carried a non-success result code.
    Rejected { code: String, message: String },
}

/// Issuance the forecast is requested from: yesterday's 23:00 run, which covers the
/// whole of today and the two days after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseSlot {
    pub date: String,
    pub time: String,
}

impl BaseSlot {
    #[must_use]
    pub fn daily(today: NaiveDate) -> Self {
        Self {
            date: DayKeys::for_date(today).yesterday,
            time: ISSUANCE_TIME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KmaClient {
    client: Client,
    base_url: String,
    service_key: String,
    page_size: u32,
}

impl KmaClient {
    pub fn new(service_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_base_url(FORECAST_URL, service_key)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            base_url: base_url.into(),
            service_key: service_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fetches every observation for `city`, following pages until `totalCount` is
    /// reached. A rejected page ends the fetch with that rejection.
    pub async fn fetch(&self, city: &City, base: &BaseSlot) -> Result<FetchOutcome, FetchError> {
        let mut observations = Vec::new();
        let mut total_count = 0usize;
        for page_no in 1..=MAX_PAGES {
            let envelope = self.fetch_page(city, base, page_no).await?;
            let header = envelope.response.header;
            if header.result_code != SUCCESS_CODE {
                tracing::debug!(
                    city = city.display_name,
                    code = %header.result_code,
                    message = %header.result_msg,
                    "forecast provider rejected request"
                );
                return Ok(FetchOutcome::Rejected {
                    code: header.result_code,
                    message: header.result_msg,
                });
            }

            let Some(body) = envelope.response.body else {
                break;
            };
            let items = body.items.map(|items| items.item).unwrap_or_default();
            let page_len = items.len();
            observations.extend(items.into_iter().map(Item::into_observation));
            total_count = body.total_count as usize;

            if page_len == 0 || observations.len() >= total_count {
                break;
            }
        }

        if observations.len() < total_count {
            tracing::warn!(
                city = city.display_name,
                received = observations.len(),
                total_count,
                max_pages = MAX_PAGES,
                page_size = self.page_size,
                "stopped paging before totalCount, forecast is truncated"
            );
        }

        tracing::debug!(
            city = city.display_name,
            count = observations.len(),
            "forecast observations received"
        );
        Ok(FetchOutcome::Forecast(observations))
    }

    async fn fetch_page(
        &self,
        city: &City,
        base: &BaseSlot,
        page_no: u32,
    ) -> Result<Envelope, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("serviceKey", self.service_key.clone()),
                ("numOfRows", self.page_size.to_string()),
                ("pageNo", page_no.to_string()),
                ("base_date", base.date.clone()),
                ("base_time", base.time.clone()),
                ("dataType", "JSON".to_string()),
                ("nx", city.nx.to_string()),
                ("ny", city.ny.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: ResponseBlock,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    header: Header,
    #[serde(default)]
    body: Option<Body>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Header {
    result_code: String,
    #[serde(default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Body {
    #[serde(default, deserialize_with = "lenient_items")]
    items: Option<Items>,
    #[serde(default)]
    total_count: u32,
}

#[derive(Debug, Deserialize)]
struct Items {
    #[serde(default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    category: String,
    fcst_date: String,
    fcst_time: String,
    fcst_value: String,
}

impl Item {
    fn into_observation(self) -> RawObservation {
        RawObservation {
            date: self.fcst_date,
            time: self.fcst_time,
            category: self.category,
            value: self.fcst_value,
        }
    }
}

// An empty result set is sometimes sent as `"items": ""`.
fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Items>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ItemsOrBlank {
        Items(Items),
        Blank(String),
    }

    Ok(match Option::<ItemsOrBlank>::deserialize(deserializer)? {
        Some(ItemsOrBlank::Items(items)) => Some(items),
        Some(ItemsOrBlank::Blank(_)) | None => None,
    })
}
