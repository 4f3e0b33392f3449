use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation};

/// put item operation
#[derive(Debug, PartialEq)]
struct PutItemInput {
    item: common::Item,
    write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use dynamodb_books::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: common::Item::from([(
///         "isbn".to_string(),
///         types::AttributeValue::S("9780000000002".to_string()),
///     )]),
///     write_args: write::common::WriteArgs {
///         condition: Some(common::condition::KeyCondition::not_exists("isbn")),
///         table_name: "BooksTable".to_string(),
///         ..Default::default()
///     },
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct PutItem {
    /// The item to put into the table, already in attribute-value form.
    pub item: common::Item,
    /// Additional write operation arguments (table name, condition, return values).
    pub write_args: write::common::WriteArgs,
}

impl From<PutItem> for PutItemInput {
    fn from(put_item: PutItem) -> Self {
        Self {
            item: put_item.item,
            write_operation: put_item.write_args.into(),
        }
    }
}

impl PutItem {
    /// Execute the put item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put_item: PutItemInput = self.into();
        let builder = client.put_item().set_item(Some(put_item.item));
        crate::apply_write_operation!(builder, put_item.write_operation)
            .send()
            .await
    }
}
