use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation};

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    key: common::Item,
    read_args: read::common::ReadArgs,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_books::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     key: common::key::Key::isbn("9780000000002"),
///     read_args: read::common::ReadArgs {
///         table_name: "BooksTable".to_string(),
///         ..Default::default()
///     },
/// };
/// get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem {
    /// The primary key of the item to retrieve.
    pub key: common::key::Key,
    /// Additional read operation arguments (table name, consistent read).
    pub read_args: read::common::ReadArgs,
}

impl From<GetItem> for GetItemInput {
    fn from(get_item: GetItem) -> Self {
        Self {
            key: get_item.key.into_item(),
            read_args: get_item.read_args,
        }
    }
}

impl GetItem {
    /// Execute the get item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.into();
        let builder = client.get_item().set_key(Some(get_item.key));
        crate::apply_read_operation!(builder, get_item.read_args)
            .send()
            .await
    }
}
