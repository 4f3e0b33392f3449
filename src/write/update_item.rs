use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// SET assignments, applied in order.
///
/// Every attribute name goes through a `#name` placeholder, so reserved words
/// such as `name` are safe to assign.
///
/// ```rust
/// use aws_sdk_dynamodb::types;
/// use dynamodb_books::write::update_item;
///
/// let set = update_item::SetInputs(vec![(
///     "authors".to_string(),
///     types::AttributeValue::S("Ursula K. Le Guin".to_string()),
/// )]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetInputs(pub Vec<(String, types::AttributeValue)>);

impl From<SetInputs> for common::ExpressionInput {
    fn from(set_inputs: SetInputs) -> Self {
        let operations = set_inputs
            .0
            .into_iter()
            .enumerate()
            .map(|(index, (key, value))| {
                let placeholder = common::placeholder(&key);
                let value_placeholder = format!(":set{index}");
                let expression = format!("{placeholder} = {value_placeholder}");
                Self {
                    expression,
                    expression_attribute_names: collections::HashMap::from([(placeholder, key)]),
                    expression_attribute_values: collections::HashMap::from([(
                        value_placeholder,
                        value,
                    )]),
                }
            })
            .collect();
        let mut operation = Self::merge(", ", operations);
        if !operation.expression.is_empty() {
            operation.expression = format!("SET {}", operation.expression);
        }
        operation
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: common::Item,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use dynamodb_books::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::Key::isbn("9780000000002"),
///     set: write::update_item::SetInputs(vec![(
///         "book_name".to_string(),
///         types::AttributeValue::S("The Dispossessed".to_string()),
///     )]),
///     write_args: write::common::WriteArgs {
///         condition: Some(common::condition::KeyCondition::exists("isbn")),
///         return_values: Some(types::ReturnValue::UpdatedNew),
///         table_name: "BooksTable".to_string(),
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem {
    /// The primary key of the item to update.
    pub key: common::key::Key,
    /// The attributes to assign.
    pub set: SetInputs,
    /// Additional write operation arguments (table name, condition, return values).
    pub write_args: write::common::WriteArgs,
}

impl From<UpdateItem> for UpdateItemInput {
    fn from(update_item: UpdateItem) -> Self {
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let update_expression = write_operation.merge_expression(update_item.set.into());
        Self {
            key: update_item.key.into_item(),
            update_expression,
            write_operation,
        }
    }
}

impl UpdateItem {
    /// Execute the update item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.into();
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::empty(
        SetInputs::default(),
        common::ExpressionInput::default()
    )]
    #[case::single(
        SetInputs(
            vec![
                (
                    "a".to_string(),
                    types::AttributeValue::S(
                        "b".to_string()
                    )
                ),
            ]
        ),
        common::ExpressionInput {
            expression: "SET #a = :set0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#a".to_string(), "a".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::multiple(
        SetInputs(
            vec![
                (
                    "a".to_string(),
                    types::AttributeValue::S(
                        "b".to_string()
                    )
                ),
                (
                    "c".to_string(),
                    types::AttributeValue::S(
                        "d".to_string()
                    )
                ),
            ]
        ),
        common::ExpressionInput {
            expression: "SET #a = :set0, #c = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#a".to_string(), "a".to_string()),
                    ("#c".to_string(), "c".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::S(
                            "d".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    fn test_set_inputs(#[case] args: SetInputs, #[case] expected: common::ExpressionInput) {
        let actual: common::ExpressionInput = args.into();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::update_if_present(
        UpdateItem {
            key: common::key::Key::isbn("1111111111111"),
            set: SetInputs(
                vec![
                    (
                        "book_name".to_string(),
                        types::AttributeValue::S(
                            "e".to_string()
                        )
                    ),
                ]
            ),
            write_args: write::common::WriteArgs {
                condition: Some(
                    common::condition::KeyCondition::exists("isbn")
                ),
                return_values: Some(
                    types::ReturnValue::UpdatedNew
                ),
                table_name: "f".to_string(),
            },
        },
        UpdateItemInput {
            key: common::Item::from(
                [
                    (
                        "isbn".to_string(),
                        types::AttributeValue::S(
                            "1111111111111".to_string()
                        )
                    ),
                ]
            ),
            update_expression: "SET #book_name = :set0".to_string(),
            write_operation: write::common::WriteInput {
                condition_expression: Some(
                    "attribute_exists(#isbn)".to_string()
                ),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#isbn".to_string(), "isbn".to_string()),
                            ("#book_name".to_string(), "book_name".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":set0".to_string(),
                                types::AttributeValue::S(
                                    "e".to_string()
                                )
                            ),
                        ]
                    )
                ),
                return_values: Some(
                    types::ReturnValue::UpdatedNew
                ),
                table_name: "f".to_string(),
            },
        }
    )]
    fn test_update_item(#[case] args: UpdateItem, #[case] expected: UpdateItemInput) {
        let actual: UpdateItemInput = args.into();
        assert_eq!(actual, expected);
    }
}
