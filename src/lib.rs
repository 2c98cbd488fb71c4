//! Client for a generic REST DNS API.
//!
//! Adapts an API of the shape `{endpoint}/zones/{zone}/records` to the
//! standard provider contract used by DNS-record consumers such as ACME
//! clients: list, append, set and delete records in a zone. Records move
//! between the wire shape (`name`/`type`/`value` or `data`/`ttl`) and the
//! typed variants in [`record`].
//!
//! ```no_run
//! use restdns::{Provider, Record, record::Txt};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), restdns::ProviderError> {
//! let provider = Provider::new("https://dns.example.com/api", "token");
//! provider
//!     .append_records(
//!         "example.com",
//!         vec![Record::Txt(Txt {
//!             name: "_acme-challenge".to_string(),
//!             ttl: Duration::from_secs(300),
//!             text: "challenge-token".to_string(),
//!         })],
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod provider;
pub mod record;
mod types;

pub use client::{DEFAULT_MIN_TTL, Provider};
pub use error::ProviderError;
pub use provider::DnsProvider;
pub use record::Record;
