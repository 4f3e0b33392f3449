#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Books
//!
//! Serverless CRUD handlers for a book catalog stored in an Amazon DynamoDB
//! table keyed on a 13-digit ISBN.
//!
//! ## Overview
//!
//! Every handler follows the same contract: validate the path parameter and
//! the body, only then call the store, and shape the outcome into a
//! [`response::Response`] envelope. Stored items are decoded from DynamoDB's
//! tagged JSON by [`mod@codec`] before they are returned.
//!
//! ## Quick Example
//!
//! ```rust
//! use dynamodb_books::handler::{Context, Handlers, Request};
//! use dynamodb_books::store::MemoryStore;
//!
//! # async fn example() {
//! let handlers = Handlers::new(MemoryStore::new());
//! let body = r#"{
//!     "name": "A Wizard of Earthsea",
//!     "isbn": "9780000000002",
//!     "authors": "Ursula K. Le Guin",
//!     "languages": "English",
//!     "countries": "United States",
//!     "numberOfPages": "183",
//!     "releaseDate": "1968-11-01"
//! }"#;
//! let response = handlers.create(Request::with_body(body), &Context::default()).await;
//! assert_eq!(response.status_code, 201);
//! assert_eq!(response.headers["Location"], "/books/9780000000002");
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@handler`] - The create, get, update, delete and list handlers
//! - [`mod@store`] - The store trait with its DynamoDB and in-memory implementations
//! - [`mod@codec`] - Tagged value encoding and decoding
//! - [`mod@common`], [`mod@read`], [`mod@write`] - DynamoDB request builders

/// Tagged value codec.
pub mod codec;

/// Common utilities for keys and conditions.
pub mod common;

/// Configuration and logging setup.
pub mod config;

/// Handler error taxonomy.
pub mod error;

/// The book handlers.
pub mod handler;

/// Book record schema and validation.
pub mod model;

/// Read operations for retrieving data from DynamoDB tables.
pub mod read;

/// Response envelope shared by every handler.
pub mod response;

/// Stores the handlers persist books to.
pub mod store;

/// Write operations for modifying data in DynamoDB tables.
pub mod write;
