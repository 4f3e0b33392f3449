use crate::{
    error::{Error, Result},
    handler::{self, Request},
    model,
    response::Response,
    store::BookStore,
};

pub(super) async fn handle<S: BookStore>(store: &S, request: &Request) -> Result<Response> {
    let isbn = request.isbn()?;
    model::check_isbn(isbn)?;
    tracing::Span::current().record("isbn", isbn);

    let item = store
        .get_book(isbn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("no isbn found with id {isbn}")))?;
    Response::ok(&handler::decode_item(&item)?)
}
