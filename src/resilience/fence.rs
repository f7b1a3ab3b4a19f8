use std::collections::HashMap;

use crate::domain::city::CityKey;

/// Per-city request sequencing. A response is applied only when its ticket is newer
/// than the last one applied for that city, so a slow fetch cannot overwrite a newer
/// result.
#[derive(Debug, Clone, Default)]
pub struct RequestFence {
    issued: HashMap<CityKey, u64>,
    applied: HashMap<CityKey, u64>,
}

impl RequestFence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, city: CityKey) -> u64 {
        let ticket = self.issued.entry(city).or_insert(0);
        *ticket += 1;
        *ticket
    }

    /// Records `ticket` as applied when it is the newest seen; returns whether to apply.
    pub fn accept(&mut self, city: CityKey, ticket: u64) -> bool {
        let applied = self.applied.entry(city).or_insert(0);
        if ticket > *applied {
            *applied = ticket;
            true
        } else {
            false
        }
    }
}
