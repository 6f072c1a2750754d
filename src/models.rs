use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A stored alias. `exp` is an absolute Unix timestamp in seconds.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UrlRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub long_url: String,
    pub short_url: String,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl UrlRecord {
    #[must_use]
    pub fn new(long_url: String, short_url: String, exp: Option<i64>) -> Self {
        Self {
            id: None,
            long_url,
            short_url,
            exp,
        }
    }

    /// Records without `exp` never expire; at exactly `exp` the record is still live.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| now > exp)
    }
}

/// Body of `POST /shorten`. `exp` is relative, in minutes.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub long_url: String,
    pub short_url: String,
    pub exp: Option<i64>,
}

impl From<UrlRecord> for ShortenResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            long_url: record.long_url,
            short_url: record.short_url,
            exp: record.exp,
        }
    }
}
