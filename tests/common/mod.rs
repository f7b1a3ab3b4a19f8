#![allow(dead_code)]

use kma_weather::{
    cli::{CityArg, Cli},
    domain::forecast::RawObservation,
};
use serde_json::{Value, json};

pub fn test_cli(forecast_url: Option<String>) -> Cli {
    Cli {
        city: CityArg::Seoul,
        service_key: "test-key".to_string(),
        forecast_url,
        page_size: 1000,
        refresh_interval: 300,
        clock_interval: 1,
        one_shot: false,
        json: false,
    }
}

/// Every recognized category for one forecast hour, in provider order.
pub fn full_hour(date: &str, time: &str, values: [&str; 7]) -> Vec<RawObservation> {
    ["TMP", "REH", "SKY", "PTY", "WSD", "POP", "PCP"]
        .into_iter()
        .zip(values)
        .map(|(category, value)| RawObservation::new(date, time, category, value))
        .collect()
}

pub fn item_json(obs: &RawObservation) -> Value {
    json!({
        "baseDate": "20261016",
        "baseTime": "2300",
        "category": obs.category,
        "fcstDate": obs.date,
        "fcstTime": obs.time,
        "fcstValue": obs.value,
        "nx": 60,
        "ny": 127
    })
}

pub fn success_payload(observations: &[RawObservation], total_count: usize) -> Value {
    json!({
        "response": {
            "header": { "resultCode": "00", "resultMsg": "NORMAL_SERVICE" },
            "body": {
                "dataType": "JSON",
                "items": { "item": observations.iter().map(item_json).collect::<Vec<_>>() },
                "pageNo": 1,
                "numOfRows": 1000,
                "totalCount": total_count
            }
        }
    })
}

pub fn rejected_payload(code: &str, message: &str) -> Value {
    json!({
        "response": {
            "header": { "resultCode": code, "resultMsg": message }
        }
    })
}
