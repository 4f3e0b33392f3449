use crate::{
    error::{Error, Result},
    handler::Request,
    model,
    response::Response,
    store::{BookStore, StoreError},
};

pub(super) async fn handle<S: BookStore>(store: &S, request: &Request) -> Result<Response> {
    let isbn = request.isbn()?;
    model::check_isbn(isbn)?;
    tracing::Span::current().record("isbn", isbn);

    match store.delete_book(isbn).await {
        Ok(()) => Ok(Response::no_content()),
        Err(StoreError::ConditionFailed) => Err(Error::NotFound("Book does not exist".to_string())),
        Err(error) => Err(error.into()),
    }
}
