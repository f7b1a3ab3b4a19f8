use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

#[must_use]
pub fn evaluate_freshness(
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    now: DateTime<Utc>,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if consecutive_failures >= 3 {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    let age = now - last_success;

    if age > Duration::minutes(30) || consecutive_failures >= 3 {
        FreshnessState::Offline
    } else if age > Duration::minutes(10) || consecutive_failures >= 1 {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}

/// Outcome history of the periodic refresh.
#[derive(Debug, Clone)]
pub struct RefreshMetadata {
    pub last_success: Option<DateTime<Utc>>,
    pub state: FreshnessState,
    pub consecutive_failures: u32,
}

impl Default for RefreshMetadata {
    fn default() -> Self {
        Self {
            last_success: None,
            state: FreshnessState::Stale,
            consecutive_failures: 0,
        }
    }
}

impl RefreshMetadata {
    pub fn mark_success(&mut self, now: DateTime<Utc>) {
        self.last_success = Some(now);
        self.consecutive_failures = 0;
        self.state = FreshnessState::Fresh;
    }

    pub fn mark_failure(&mut self, now: DateTime<Utc>) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.reevaluate(now);
    }

    pub fn reevaluate(&mut self, now: DateTime<Utc>) {
        self.state = evaluate_freshness(self.last_success, self.consecutive_failures, now);
    }

    #[must_use]
    pub fn age_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_success.map(|ts| (now - ts).num_minutes())
    }
}
