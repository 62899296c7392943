use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::config::Config;
use crate::models::Record;
use crate::store::RecordStore;

/// Partition key attribute of the table
pub const KEY_ATTRIBUTE: &str = "id";

/// Attribute holding the record's value
pub const VALUE_ATTRIBUTE: &str = "value";

/// DynamoDB-backed record store, cheap to clone
#[derive(Clone, Debug)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Create a store from configuration
    ///
    /// Credentials and region come from the standard AWS provider chain.
    /// When `dynamodb_endpoint` is set the client talks to that endpoint
    /// instead, which is how DynamoDB Local is targeted during development.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(endpoint) = &config.dynamodb_endpoint {
            tracing::info!("Connecting to DynamoDB endpoint at: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        } else {
            tracing::info!("Connecting to DynamoDB");
        }

        let sdk_config = loader.load().await;
        let client = Client::new(&sdk_config);

        tracing::info!("DynamoDB client ready for table: {}", config.table_name);

        Ok(Self::new(client, config.table_name.clone()))
    }

    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl RecordStore for DynamoDbStore {
    async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))
            .with_context(|| format!("Failed to read item '{}' from table '{}'", key, self.table_name))?;

        match output.item() {
            Some(item) => {
                let record = record_from_item(key, item)?;
                tracing::debug!("Read item with id: {}", key);
                Ok(Some(record))
            }
            None => {
                tracing::debug!("Item not found with id: {}", key);
                Ok(None)
            }
        }
    }

    /// Describe the configured table to verify credentials and reachability
    async fn health_check(&self) -> Result<()> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))
            .with_context(|| format!("Failed to describe table '{}'", self.table_name))?;

        tracing::debug!("Health check query succeeded");
        Ok(())
    }
}

/// Convert a raw DynamoDB item into a [`Record`].
///
/// An item without a string `value` attribute is treated as a malformed
/// response rather than a missing record.
fn record_from_item(key: &str, item: &HashMap<String, AttributeValue>) -> Result<Record> {
    let value = item
        .get(VALUE_ATTRIBUTE)
        .with_context(|| format!("Item '{}' has no '{}' attribute", key, VALUE_ATTRIBUTE))?
        .as_s()
        .map_err(|_| anyhow!("Item '{}' attribute '{}' is not a string", key, VALUE_ATTRIBUTE))?;

    Ok(Record {
        id: key.to_string(),
        value: value.clone(),
    })
}
