//! Request handlers for the five book operations.
//!
//! Every handler validates in the same order: path parameter, body, body
//! schema and content, ISBN format, then the store call, whose outcome is
//! mapped to a [`Response`]. Nothing reaches the store before validation
//! has passed.

mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::{
    codec, common,
    error::{Error, Result},
    response::Response,
    store,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections;
use tracing::Instrument;

/// Name of the path parameter carrying the ISBN.
pub const ISBN_PARAMETER: &str = "isbn";

/// The book operations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    /// Create a book.
    Create,
    /// Read one book.
    Get,
    /// Replace the attributes of a book.
    Update,
    /// Delete a book.
    Delete,
    /// Read every book.
    List,
}

impl Operation {
    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }

    /// Message of the generic `500` answered when the operation fails server-side.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "An error occurred while creating the book.",
            Self::Get => "An error occurred while getting the book.",
            Self::Update => "An error occurred while updating the book.",
            Self::Delete => "An error occurred while deleting the book.",
            Self::List => "An error occurred while fetching all books.",
        }
    }
}

/// Incoming event.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Path parameters, absent when the route has none.
    #[serde(default)]
    pub path_parameters: Option<collections::HashMap<String, String>>,
    /// Raw request body.
    #[serde(default)]
    pub body: Option<String>,
}

impl Request {
    /// Request addressing `isbn`, optionally carrying `body`.
    pub fn for_isbn(isbn: &str, body: Option<String>) -> Self {
        Self {
            path_parameters: Some(collections::HashMap::from([(
                ISBN_PARAMETER.to_string(),
                isbn.to_string(),
            )])),
            body,
        }
    }

    /// Request carrying only `body`.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }

    fn isbn(&self) -> Result<&str> {
        let path_parameters = self
            .path_parameters
            .as_ref()
            .ok_or_else(|| Error::MalformedRequest("no path parameters provided".to_string()))?;
        path_parameters
            .get(ISBN_PARAMETER)
            .map(String::as_str)
            .ok_or_else(|| {
                Error::MalformedRequest(format!("no {ISBN_PARAMETER} path parameter provided"))
            })
    }

    fn body(&self) -> Result<&str> {
        self.body
            .as_deref()
            .ok_or_else(|| Error::MalformedRequest("no request body provided".to_string()))
    }
}

/// Invocation metadata.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Context {
    /// Identifier of the invocation, attached to every log line.
    pub request_id: String,
}

/// Path of the book stored under `isbn`.
pub fn location(isbn: &str) -> String {
    format!("/books/{isbn}")
}

fn decode_item(item: &common::Item) -> Result<Value> {
    Ok(codec::decode_document(&codec::tag_item(item))?)
}

/// The five handlers over an injected store.
///
/// ```rust
/// use dynamodb_books::handler::{Context, Handlers, Request};
/// use dynamodb_books::store::MemoryStore;
///
/// # async fn example() {
/// let handlers = Handlers::new(MemoryStore::new());
/// let response = handlers
///     .get(Request::for_isbn("9780000000002", None), &Context::default())
///     .await;
/// assert_eq!(response.status_code, 404);
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Handlers<S> {
    store: S,
}

impl<S: store::BookStore> Handlers<S> {
    /// Handlers answering from `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run `operation` on `request`.
    ///
    /// Never fails: every error becomes an error envelope.
    pub async fn handle(&self, operation: Operation, request: Request, context: &Context) -> Response {
        let span = tracing::info_span!(
            "handler",
            operation = operation.name(),
            request_id = %context.request_id,
            isbn = tracing::field::Empty,
        );
        async {
            tracing::debug!(?request, "incoming request");
            let outcome = match operation {
                Operation::Create => create::handle(&self.store, &request).await,
                Operation::Get => get::handle(&self.store, &request).await,
                Operation::Update => update::handle(&self.store, &request).await,
                Operation::Delete => delete::handle(&self.store, &request).await,
                Operation::List => list::handle(&self.store).await,
            };
            match outcome {
                Ok(response) => {
                    tracing::info!(status_code = response.status_code, "request handled");
                    response
                }
                Err(error) => {
                    let response = Response::from_error(operation, &error);
                    if error.is_client_error() {
                        tracing::info!(status_code = response.status_code, %error, "request rejected");
                    } else {
                        tracing::error!(status_code = response.status_code, %error, "request failed");
                    }
                    response
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Create the book in the body: `201`, or `403` when the ISBN is taken.
    pub async fn create(&self, request: Request, context: &Context) -> Response {
        self.handle(Operation::Create, request, context).await
    }

    /// Read the book under the path ISBN: `200`, or `404`.
    pub async fn get(&self, request: Request, context: &Context) -> Response {
        self.handle(Operation::Get, request, context).await
    }

    /// Replace the book under the path ISBN with the body: `200`, or `404`.
    pub async fn update(&self, request: Request, context: &Context) -> Response {
        self.handle(Operation::Update, request, context).await
    }

    /// Delete the book under the path ISBN: `204`, or `404`.
    pub async fn delete(&self, request: Request, context: &Context) -> Response {
        self.handle(Operation::Delete, request, context).await
    }

    /// Read every book: `200`.
    pub async fn list(&self, request: Request, context: &Context) -> Response {
        self.handle(Operation::List, request, context).await
    }
}
