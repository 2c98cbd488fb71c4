use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::record::{Record, Rr};

/// Record element as returned by read endpoints.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct ApiRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    pub ttl: u64,
}

#[derive(Deserialize, Debug)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<ApiRecord>,
}

/// Record element as sent to write endpoints. Reads carry the value in
/// `value`, writes in `data`; the API requires this asymmetry.
#[derive(Serialize, Debug)]
pub(crate) struct WriteRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: String,
    pub ttl: u64,
}

#[derive(Serialize, Debug)]
pub(crate) struct WriteRequest {
    pub records: Vec<WriteRecord>,
}

impl From<ApiRecord> for Rr {
    fn from(api: ApiRecord) -> Self {
        Rr {
            name: api.name,
            rtype: api.record_type,
            data: api.value,
            ttl: Duration::from_secs(api.ttl),
        }
    }
}

/// Decodes a list-records response body into typed records. The body is
/// either `{"records": [...]}` or a bare array of the same elements; a
/// single unconvertible record aborts the whole decode.
pub(crate) fn decode_records(body: &[u8]) -> Result<Vec<Record>, ProviderError> {
    let raw = match serde_json::from_slice::<RecordsResponse>(body) {
        Ok(response) => response.records,
        Err(_) => serde_json::from_slice::<Vec<ApiRecord>>(body).map_err(ProviderError::Decode)?,
    };
    raw.into_iter()
        .map(|api| Rr::from(api).try_typed())
        .collect()
}
