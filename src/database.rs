use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use mongodb::{
    Client, Collection, IndexModel,
    options::{ClientOptions, ServerApi, ServerApiVersion},
};

use crate::models::UrlRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[cfg(test)]
    #[error("store unavailable")]
    Unavailable,
}

/// Alias-keyed access to the stored records.
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Creates the record, or replaces `long_url` and `exp` of the one already
    /// holding `record.short_url`.
    async fn upsert(&self, record: &UrlRecord) -> Result<(), StoreError>;

    async fn find_by_alias(&self, short_url: &str) -> Result<Option<UrlRecord>, StoreError>;
}

pub struct StoreOptions<'a> {
    pub uri: &'a str,
    pub database: &'a str,
    pub collection: &'a str,
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct Database {
    urls: Collection<UrlRecord>,
}

impl Database {
    pub async fn new(options: &StoreOptions<'_>) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(options.uri).await?;
        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        if let Some(timeout) = options.timeout {
            client_options.connect_timeout = Some(timeout);
            client_options.server_selection_timeout = Some(timeout);
        }

        let client = Client::with_options(client_options)?;
        let database = client.database(options.database);
        database.run_command(doc! { "ping": 1 }).await?;

        let urls = database.collection::<UrlRecord>(options.collection);
        // Lookups still work without the index; missing privileges must not block startup.
        let index = IndexModel::builder().keys(doc! { "short_url": 1 }).build();
        if let Err(err) = urls.create_index(index).await {
            tracing::warn!(err = ?err, "could not create short_url index");
        }

        Ok(Self { urls })
    }
}

#[async_trait]
impl UrlStore for Database {
    async fn upsert(&self, record: &UrlRecord) -> Result<(), StoreError> {
        self.urls
            .update_one(
                doc! { "short_url": record.short_url.as_str() },
                doc! {
                    "$set": {
                        "long_url": record.long_url.as_str(),
                        "short_url": record.short_url.as_str(),
                        "exp": record.exp,
                    }
                },
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn find_by_alias(&self, short_url: &str) -> Result<Option<UrlRecord>, StoreError> {
        let url = self.urls.find_one(doc! { "short_url": short_url }).await?;

        Ok(url)
    }
}
