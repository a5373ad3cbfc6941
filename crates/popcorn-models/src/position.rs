use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// OpenStreetMap link centred on this position
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/#map=16/{}/{}",
            self.latitude, self.longitude
        )
    }
}
