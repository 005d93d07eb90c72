//! Response model of the index's JSON search API.

use serde::Deserialize;

/// One record of a search response. Every field is a string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    pub info_hash: String,
    pub name: String,
    pub seeders: String,
    pub leechers: String,
    pub size: String,
    /// Upload time, seconds since the Unix epoch.
    pub added: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub num_files: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub imdb: Option<String>,
}

impl SearchResult {
    /// Whether this record is the index's "nothing found" marker.
    pub fn is_placeholder(&self) -> bool {
        !self.info_hash.is_empty() && self.info_hash.chars().all(|c| c == '0')
    }

    /// Seeder count, 0 when unparsable.
    pub fn seeder_count(&self) -> u64 {
        self.seeders.trim().parse().unwrap_or(0)
    }
}
