//! Key-value store the handlers write books to.
//!
//! Creates are conditional on the ISBN being free, updates and deletes on it
//! being taken; a failed condition is reported as [`StoreError::ConditionFailed`]
//! and translated by the handlers.

/// DynamoDB-backed store.
pub mod dynamo;

/// In-process store with the same conditional semantics.
pub mod memory;

use crate::common;

use aws_sdk_dynamodb::{error, types};
use thiserror::Error;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write's existence condition on the key did not hold.
    #[error("conditional check failed")]
    ConditionFailed,
    /// Any other failure reported by the backend.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Classify an SDK error, recognising the operation's conditional check failure.
    pub fn from_sdk<E, R>(source: error::SdkError<E, R>, is_condition_failure: fn(&E) -> bool) -> Self
    where
        E: std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        let condition_failed = source.as_service_error().is_some_and(is_condition_failure);
        if condition_failed {
            Self::ConditionFailed
        } else {
            Self::backend(source)
        }
    }

    /// Wrap any SDK error as a backend failure, keeping its full source chain.
    pub fn backend<E: std::error::Error>(source: E) -> Self {
        Self::Backend(error::DisplayErrorContext(source).to_string())
    }
}

/// Store result.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Operations the handlers need from the books table.
pub trait BookStore {
    /// Write `item` unless an item with the same ISBN exists.
    fn put_book(&self, item: common::Item) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the item stored under `isbn`, if any.
    fn get_book(&self, isbn: &str) -> impl Future<Output = Result<Option<common::Item>>> + Send;

    /// Assign `updates` on the item stored under `isbn` if it exists.
    ///
    /// Returns the updated attributes with their new values.
    fn update_book(
        &self,
        isbn: &str,
        updates: Vec<(String, types::AttributeValue)>,
    ) -> impl Future<Output = Result<common::Item>> + Send;

    /// Delete the item stored under `isbn` if it exists.
    fn delete_book(&self, isbn: &str) -> impl Future<Output = Result<()>> + Send;

    /// Every stored item.
    fn scan_books(&self) -> impl Future<Output = Result<Vec<common::Item>>> + Send;
}
