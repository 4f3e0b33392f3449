//! Write operations for modifying data in DynamoDB tables.
//!
//! This module provides the conditional writes the book handlers rely on:
//! - Putting a new item only when its key is free
//! - Updating an existing item's attributes
//! - Deleting an existing item by primary key

/// Common utilities and types for write operations.
pub mod common;

/// Delete item operation for removing items from tables.
pub mod delete_item;

/// Put item operation for creating items.
pub mod put_item;

/// Update item operation for modifying existing items.
pub mod update_item;
