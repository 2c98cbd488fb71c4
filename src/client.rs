use std::env;
use std::sync::OnceLock;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::record::Record;
use crate::types::{WriteRecord, WriteRequest, decode_records};

/// Minimum wire TTL applied to records written through append/set unless
/// overridden via [`Provider::min_ttl`]. Prevents TTL 0 (e.g. ACME challenge
/// records) from falling back to a high zone default like 1800s, which slows
/// down propagation.
pub const DEFAULT_MIN_TTL: Duration = Duration::from_secs(120);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a REST DNS API exposing `{endpoint}/zones/{zone}/records`.
///
/// Configuration is two fields: the base `endpoint` (required at call time)
/// and an optional bearer `api_token`. The HTTP client is built lazily on
/// first use and reused afterwards.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Provider {
    /// Base URL of the REST DNS API, without a trailing slash.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token; no Authorization header is sent when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_token: String,
    /// Wire-TTL floor in seconds for append/set. `None` means the 120s
    /// default. The floor is an operational policy, not a protocol rule, so
    /// it stays overridable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ttl: Option<u64>,
    #[serde(skip)]
    client: OnceLock<Client>,
}

impl Provider {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Reads configuration from `DNS_API_ENDPOINT`, `DNS_API_TOKEN`
    /// (optional) and `DNS_API_MIN_TTL` (optional, seconds).
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            endpoint: env::var("DNS_API_ENDPOINT")?,
            api_token: env::var("DNS_API_TOKEN").unwrap_or_default(),
            min_ttl: env::var("DNS_API_MIN_TTL").ok().and_then(|v| v.parse().ok()),
            client: OnceLock::new(),
        })
    }

    fn effective_min_ttl(&self) -> Duration {
        self.min_ttl.map(Duration::from_secs).unwrap_or(DEFAULT_MIN_TTL)
    }

    fn client(&self) -> Result<&Client, ProviderError> {
        if self.endpoint.is_empty() {
            return Err(ProviderError::MissingEndpoint);
        }
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let built = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        // A racing initialization discards one of the two clients; they are
        // interchangeable, so whichever lands first wins.
        Ok(self.client.get_or_init(|| built))
    }

    async fn request(
        &self,
        method: Method,
        zone: &str,
        body: Option<&WriteRequest>,
    ) -> Result<Response, ProviderError> {
        let client = self.client()?;
        let url = format!("{}/zones/{}/records", self.endpoint, zone);
        debug!("{method} {url}");

        let mut request = client.request(method, url);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(ProviderError::Serialize)?;
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }
        Ok(request.send().await?)
    }

    fn write_payload(&self, records: &[Record], enforce_min_ttl: bool) -> WriteRequest {
        let min_ttl = self.effective_min_ttl();
        let records = records
            .iter()
            .map(|record| {
                let rr = record.rr();
                let ttl = if enforce_min_ttl && rr.ttl < min_ttl {
                    min_ttl
                } else {
                    rr.ttl
                };
                WriteRecord {
                    name: rr.name,
                    record_type: rr.rtype,
                    data: rr.data,
                    ttl: ttl.as_secs(),
                }
            })
            .collect();
        WriteRequest { records }
    }

    /// Write endpoints do not echo typed records, so the caller's own input
    /// is re-derived into the most specific typed variant. Best-effort: a
    /// value that no longer parses stays generic.
    fn retype(records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .map(|record| record.rr().typed_lossy())
            .collect()
    }

    /// Retrieves all DNS records for the zone.
    pub async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError> {
        let response = self.request(Method::GET, zone, None).await?;
        if response.status() != StatusCode::OK {
            return Err(ProviderError::Api {
                status: response.status(),
            });
        }
        let body = response.bytes().await?;
        decode_records(&body)
    }

    /// Adds records to the zone and returns the records that were added.
    pub async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let payload = self.write_payload(&records, true);
        let response = self.request(Method::POST, zone, Some(&payload)).await?;
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(Self::retype(records)),
            status => Err(ProviderError::Api { status }),
        }
    }

    /// Replaces records in the zone, updating existing ones or creating new
    /// ones, and returns the updated records.
    pub async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let payload = self.write_payload(&records, true);
        let response = self.request(Method::PUT, zone, Some(&payload)).await?;
        match response.status() {
            StatusCode::OK => Ok(Self::retype(records)),
            status => Err(ProviderError::Api { status }),
        }
    }

    /// Deletes records from the zone. Deletion is best-effort: any status
    /// other than 200/204 yields an empty result instead of an error. The
    /// TTL floor does not apply here, the TTL carries no meaning for a
    /// deletion.
    pub async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let payload = self.write_payload(&records, false);
        let response = self.request(Method::DELETE, zone, Some(&payload)).await?;
        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(Self::retype(records)),
            status => {
                warn!("DELETE /zones/{zone}/records returned {status}, treating as no-op");
                Ok(Vec::new())
            }
        }
    }
}
