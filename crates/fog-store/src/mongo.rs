//! MongoDB-backed document store.

use crate::error::StoreError;
use crate::traits::{DocumentStore, DocumentStream};
use bson::{doc, Bson, Document};
use fog_core::{Namespace, UpdatePayload};
use futures::{StreamExt, TryStreamExt};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// [`DocumentStore`] over a single long-lived MongoDB client.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Connect to MongoDB.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - MongoDB connection string (e.g., "mongodb://localhost:27017")
    pub async fn connect(connection_string: &str) -> Result<Self, StoreError> {
        tracing::debug!("Parsing MongoDB connection options");
        let mut options = ClientOptions::parse(connection_string).await?;
        // Fail fast instead of hanging on an unreachable server
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.app_name = Some("mongo-fog".to_string());

        let client = Client::with_options(options)?;
        tracing::debug!("MongoDB client created");
        Ok(Self { client })
    }

    fn collection(&self, namespace: &Namespace) -> Collection<Document> {
        self.client
            .database(&namespace.database)
            .collection(&namespace.collection)
    }
}

#[async_trait::async_trait]
impl DocumentStore for MongoStore {
    async fn list_database_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.client.list_database_names().await?)
    }

    async fn count_documents(
        &self,
        namespace: &Namespace,
        filter: Document,
    ) -> Result<u64, StoreError> {
        Ok(self.collection(namespace).count_documents(filter).await?)
    }

    async fn find(
        &self,
        namespace: &Namespace,
        filter: Document,
    ) -> Result<DocumentStream, StoreError> {
        let cursor = self.collection(namespace).find(filter).await?;
        Ok(cursor.map_err(StoreError::from).boxed())
    }

    async fn update_one(
        &self,
        namespace: &Namespace,
        id: &Bson,
        payload: &UpdatePayload,
    ) -> Result<(), StoreError> {
        if payload.is_empty() {
            tracing::trace!("Nothing to update for {id} in {namespace}");
            return Ok(());
        }
        self.collection(namespace)
            .update_one(doc! { "_id": id.clone() }, payload.to_update_document())
            .await?;
        Ok(())
    }

    async fn delete_many(
        &self,
        namespace: &Namespace,
        filter: Document,
    ) -> Result<u64, StoreError> {
        let result = self.collection(namespace).delete_many(filter).await?;
        Ok(result.deleted_count)
    }
}
