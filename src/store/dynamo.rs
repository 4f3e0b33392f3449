use crate::{common, config, read, store, write};

use aws_sdk_dynamodb::{Client, operation, types};

/// Books table in DynamoDB, accessed through a shared client.
///
/// ```rust,no_run
/// use dynamodb_books::{config, store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = config::Config::from_env()?;
/// let store = store::DynamoStore::load(&config).await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Store writing to `table_name` through `client`.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Store built from the default AWS configuration chain.
    pub async fn load(config: &config::Config) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), config.table_name.as_str())
    }

    /// Name of the backing table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn read_args(table_name: &str, consistent_read: Option<bool>) -> read::common::ReadArgs {
    read::common::ReadArgs {
        consistent_read,
        table_name: table_name.to_string(),
    }
}

fn write_args(
    table_name: &str,
    condition: common::condition::KeyCondition,
    return_values: Option<types::ReturnValue>,
) -> write::common::WriteArgs {
    write::common::WriteArgs {
        condition: Some(condition),
        return_values,
        table_name: table_name.to_string(),
    }
}

impl store::BookStore for DynamoStore {
    #[tracing::instrument(name = "dynamodb_books.put_book", skip_all, err)]
    async fn put_book(&self, item: common::Item) -> store::Result<()> {
        let put_item = write::put_item::PutItem {
            item,
            write_args: write_args(
                &self.table_name,
                common::condition::KeyCondition::not_exists(common::key::ISBN),
                None,
            ),
        };
        put_item.send(&self.client).await.map_err(|source| {
            store::StoreError::from_sdk(
                source,
                operation::put_item::PutItemError::is_conditional_check_failed_exception,
            )
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "dynamodb_books.get_book", skip(self), err)]
    async fn get_book(&self, isbn: &str) -> store::Result<Option<common::Item>> {
        let get_item = read::get_item::GetItem {
            key: common::key::Key::isbn(isbn),
            // a get right after a create or update must see the write
            read_args: read_args(&self.table_name, Some(true)),
        };
        let output = get_item
            .send(&self.client)
            .await
            .map_err(store::StoreError::backend)?;
        Ok(output.item)
    }

    #[tracing::instrument(name = "dynamodb_books.update_book", skip(self, updates), err)]
    async fn update_book(
        &self,
        isbn: &str,
        updates: Vec<(String, types::AttributeValue)>,
    ) -> store::Result<common::Item> {
        let update_item = write::update_item::UpdateItem {
            key: common::key::Key::isbn(isbn),
            set: write::update_item::SetInputs(updates),
            write_args: write_args(
                &self.table_name,
                common::condition::KeyCondition::exists(common::key::ISBN),
                Some(types::ReturnValue::UpdatedNew),
            ),
        };
        let output = update_item.send(&self.client).await.map_err(|source| {
            store::StoreError::from_sdk(
                source,
                operation::update_item::UpdateItemError::is_conditional_check_failed_exception,
            )
        })?;
        Ok(output.attributes.unwrap_or_default())
    }

    #[tracing::instrument(name = "dynamodb_books.delete_book", skip(self), err)]
    async fn delete_book(&self, isbn: &str) -> store::Result<()> {
        let delete_item = write::delete_item::DeleteItem {
            key: common::key::Key::isbn(isbn),
            write_args: write_args(
                &self.table_name,
                common::condition::KeyCondition::exists(common::key::ISBN),
                None,
            ),
        };
        delete_item.send(&self.client).await.map_err(|source| {
            store::StoreError::from_sdk(
                source,
                operation::delete_item::DeleteItemError::is_conditional_check_failed_exception,
            )
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "dynamodb_books.scan_books", skip(self), err)]
    async fn scan_books(&self) -> store::Result<Vec<common::Item>> {
        let scan = read::scan::Scan {
            read_args: read_args(&self.table_name, None),
        };
        scan.send(&self.client)
            .await
            .map_err(store::StoreError::backend)
    }
}
