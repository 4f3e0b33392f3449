use crate::{
    error::{Error, Result},
    handler::{self, Request},
    model::{BookItem, BookRequest},
    response::Response,
    store::{BookStore, StoreError},
};

pub(super) async fn handle<S: BookStore>(store: &S, request: &Request) -> Result<Response> {
    let book = BookRequest::parse(request.body()?)?;
    book.validate()?;
    tracing::Span::current().record("isbn", book.isbn.as_str());

    let item = BookItem::from(book.clone()).to_item()?;
    match store.put_book(item).await {
        Ok(()) => Response::created(&handler::location(&book.isbn), &book),
        Err(StoreError::ConditionFailed) => Err(Error::Conflict("Book already exists".to_string())),
        Err(error) => Err(error.into()),
    }
}
