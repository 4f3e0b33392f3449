use crate::{error::Result, handler, response::Response, store::BookStore};

use serde_json::Value;

pub(super) async fn handle<S: BookStore>(store: &S) -> Result<Response> {
    let items = store.scan_books().await?;
    tracing::debug!(count = items.len(), "scanned books");
    let books = items
        .iter()
        .map(handler::decode_item)
        .collect::<Result<Vec<Value>>>()?;
    Response::ok(&books)
}
