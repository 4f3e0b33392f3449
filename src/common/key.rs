use crate::common;

use aws_sdk_dynamodb::types;

/// Name of the partition key attribute of the books table.
pub const ISBN: &str = "isbn";

/// String partition key of an item.
///
/// ```rust
/// use dynamodb_books::common::key;
///
/// let key = key::Key::isbn("9780000000002");
/// assert_eq!(key.name, "isbn");
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Key {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: String,
}

impl Key {
    /// Key addressing a book by its ISBN.
    pub fn isbn(isbn: &str) -> Self {
        Self {
            name: ISBN.to_string(),
            value: isbn.to_string(),
        }
    }

    pub(crate) fn into_item(self) -> common::Item {
        common::Item::from([(self.name, types::AttributeValue::S(self.value))])
    }
}
