use crate::{
    error::{Error, Result},
    handler::{self, Request},
    model::{self, BookItem, BookRequest},
    response::Response,
    store::{BookStore, StoreError},
};

pub(super) async fn handle<S: BookStore>(store: &S, request: &Request) -> Result<Response> {
    let isbn = request.isbn()?;
    let book = BookRequest::parse(request.body()?)?;
    book.validate()?;
    model::check_isbn(isbn)?;
    if book.isbn != isbn {
        return Err(Error::Validation(format!(
            "isbn {} in body does not match path isbn {isbn}",
            book.isbn
        )));
    }
    tracing::Span::current().record("isbn", isbn);

    let updates = BookItem::from(book).to_updates();
    match store.update_book(isbn, updates).await {
        Ok(updated) => Response::ok(&handler::decode_item(&updated)?),
        Err(StoreError::ConditionFailed) => Err(Error::NotFound("Book does not exist".to_string())),
        Err(error) => Err(error.into()),
    }
}
