use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::client::Provider;
use crate::error::ProviderError;
use crate::record::Record;

/// The zone-record provider contract: list, append, set and delete records
/// in a zone. [`Provider`] implements it over the REST API; consumers that
/// only need the contract can take a `dyn DnsProvider`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DnsProvider: Send + Sync {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError>;
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError>;
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError>;
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError>;
}

#[async_trait]
impl DnsProvider for Provider {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError> {
        Provider::get_records(self, zone).await
    }

    async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        Provider::append_records(self, zone, records).await
    }

    async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        Provider::set_records(self, zone, records).await
    }

    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, ProviderError> {
        Provider::delete_records(self, zone, records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Txt;
    use std::time::Duration;

    #[test]
    fn test_trait_object_dispatch() {
        let mut mock = MockDnsProvider::new();
        mock.expect_get_records()
            .withf(|zone| zone == "example.com")
            .returning(|_| {
                Ok(vec![Record::Txt(Txt {
                    name: "a".to_string(),
                    ttl: Duration::from_secs(60),
                    text: "x".to_string(),
                })])
            });
        mock.expect_delete_records()
            .withf(|zone, records| zone == "example.com" && records.is_empty())
            .returning(|_, _| Ok(Vec::new()));

        let provider: &dyn DnsProvider = &mock;
        let records = tokio_test::block_on(provider.get_records("example.com")).unwrap();
        assert_eq!(records.len(), 1);
        let deleted =
            tokio_test::block_on(provider.delete_records("example.com", Vec::new())).unwrap();
        assert!(deleted.is_empty());
    }
}
