//! Book record schema.
//!
//! [`BookRequest`] is the wire shape accepted by create and update,
//! [`BookItem`] the shape persisted in the table.

use crate::{codec, common, error::Error, error::Result};

use aws_sdk_dynamodb::types;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Number of digits in an ISBN.
pub const ISBN_LENGTH: usize = 13;

/// Attribute names of the books table.
pub mod attribute {
    pub use crate::common::key::ISBN;

    /// Title of the book.
    pub const BOOK_NAME: &str = "book_name";
    /// Free-text author list.
    pub const AUTHORS: &str = "authors";
    /// Free-text language list.
    pub const LANGUAGES: &str = "languages";
    /// Free-text country list.
    pub const COUNTRIES: &str = "countries";
    /// Page count, stored as a string.
    pub const NUMBER_OF_PAGES: &str = "number_of_pages";
    /// Release date, `YYYY-MM-DD`.
    pub const RELEASE_DATE: &str = "release_date";
}

/// Request body of create and update.
///
/// ```rust
/// use dynamodb_books::model::BookRequest;
///
/// let book = BookRequest::parse(r#"{
///     "name": "A Wizard of Earthsea",
///     "isbn": "9780000000002",
///     "authors": "Ursula K. Le Guin",
///     "languages": "English",
///     "countries": "United States",
///     "numberOfPages": "183",
///     "releaseDate": "1968-11-01"
/// }"#).unwrap();
/// assert!(book.validate().is_ok());
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    /// Title of the book.
    pub name: String,
    /// 13-digit identifier.
    pub isbn: String,
    /// Free-text author list.
    pub authors: String,
    /// Free-text language list.
    pub languages: String,
    /// Free-text country list.
    pub countries: String,
    /// Page count; an integer on the wire is kept as its decimal string.
    #[serde(deserialize_with = "page_count")]
    pub number_of_pages: String,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: String,
}

fn page_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PageCount {
        Text(String),
        Count(u64),
    }

    let page_count = match PageCount::deserialize(deserializer)? {
        PageCount::Text(text) => text,
        PageCount::Count(count) => count.to_string(),
    };
    Ok(page_count)
}

impl BookRequest {
    /// Parse a raw request body.
    ///
    /// Fails with [`Error::MalformedRequest`] on invalid JSON or when any field
    /// is missing or not a string.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(|error| {
            Error::MalformedRequest(format!("request body is not valid JSON: {error}"))
        })?;
        serde_json::from_value(value)
            .map_err(|error| Error::MalformedRequest(format!("request body malformed: {error}")))
    }

    /// Check the release date, then the ISBN.
    pub fn validate(&self) -> Result<()> {
        if !validate_release_date(&self.release_date) {
            return Err(Error::Validation(format!(
                "releaseDate {} does not match YYYY-MM-DD (ISO 8601)",
                self.release_date
            )));
        }
        check_isbn(&self.isbn)
    }
}

/// Whether `isbn` is exactly 13 ASCII digits.
pub fn validate_isbn(isbn: &str) -> bool {
    isbn.len() == ISBN_LENGTH && isbn.bytes().all(|byte| byte.is_ascii_digit())
}

/// [`validate_isbn`] as a result carrying the user-facing message.
pub fn check_isbn(isbn: &str) -> Result<()> {
    if validate_isbn(isbn) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "invalid isbn {isbn} must be a {ISBN_LENGTH}char digit"
        )))
    }
}

/// Whether `date` is `YYYY-MM-DD` naming a real calendar day in years 1 to 9999.
///
/// Month and day may drop their leading zero.
///
/// ```rust
/// use dynamodb_books::model::validate_release_date;
///
/// assert!(validate_release_date("2020-02-29"));
/// assert!(!validate_release_date("2021-02-29"));
/// assert!(!validate_release_date("12345-06-07"));
/// ```
pub fn validate_release_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = *parts.as_slice() else {
        return false;
    };
    let digits = |part: &str, lengths: std::ops::RangeInclusive<usize>| {
        lengths.contains(&part.len()) && part.bytes().all(|byte| byte.is_ascii_digit())
    };
    if !(digits(year, 4..=4) && digits(month, 1..=2) && digits(day, 1..=2)) {
        return false;
    }
    match (year.parse::<i32>(), month.parse(), day.parse()) {
        (Ok(year), Ok(month), Ok(day)) if year >= 1 => {
            NaiveDate::from_ymd_opt(year, month, day).is_some()
        }
        _ => false,
    }
}

/// A book as persisted in the table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookItem {
    /// Partition key.
    pub isbn: String,
    /// Title of the book.
    pub name: String,
    /// Free-text author list.
    pub authors: String,
    /// Free-text language list.
    pub languages: String,
    /// Free-text country list.
    pub countries: String,
    /// Page count.
    pub number_of_pages: String,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: String,
}

impl From<BookRequest> for BookItem {
    fn from(request: BookRequest) -> Self {
        Self {
            isbn: request.isbn,
            name: request.name,
            authors: request.authors,
            languages: request.languages,
            countries: request.countries,
            number_of_pages: request.number_of_pages,
            release_date: request.release_date,
        }
    }
}

impl BookItem {
    fn fields(&self) -> [(&str, &str); 7] {
        [
            (attribute::ISBN, &self.isbn),
            (attribute::BOOK_NAME, &self.name),
            (attribute::AUTHORS, &self.authors),
            (attribute::LANGUAGES, &self.languages),
            (attribute::COUNTRIES, &self.countries),
            (attribute::NUMBER_OF_PAGES, &self.number_of_pages),
            (attribute::RELEASE_DATE, &self.release_date),
        ]
    }

    /// The tagged storage document, every attribute a string node.
    pub fn to_document(&self) -> Map<String, Value> {
        codec::encode_record(self.fields())
    }

    /// The item to write on create.
    pub fn to_item(&self) -> Result<common::Item> {
        Ok(codec::untag_item(&self.to_document())?)
    }

    /// The attributes replaced on update, i.e. everything but the key.
    pub fn to_updates(&self) -> Vec<(String, types::AttributeValue)> {
        self.fields()
            .into_iter()
            .filter(|(name, _)| *name != attribute::ISBN)
            .map(|(name, value)| {
                (
                    name.to_string(),
                    types::AttributeValue::S(value.to_string()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    fn request() -> Value {
        json!(
            {
                "name": "A Wizard of Earthsea",
                "isbn": "1111111111111",
                "authors": "Ursula K. Le Guin",
                "languages": "English",
                "countries": "United States",
                "numberOfPages": "183",
                "releaseDate": "1968-11-01"
            }
        )
    }

    fn book() -> BookItem {
        BookItem {
            isbn: "1111111111111".to_string(),
            name: "A Wizard of Earthsea".to_string(),
            authors: "Ursula K. Le Guin".to_string(),
            languages: "English".to_string(),
            countries: "United States".to_string(),
            number_of_pages: "183".to_string(),
            release_date: "1968-11-01".to_string(),
        }
    }

    #[rstest]
    #[case::thirteen_digits("1111111111111", true)]
    #[case::leading_zeros("0000000000000", true)]
    #[case::twelve_digits("111111111111", false)]
    #[case::fourteen_digits("11111111111111", false)]
    #[case::empty("", false)]
    #[case::letter("111111111111x", false)]
    #[case::hyphenated("978-0-00-0000", false)]
    #[case::whitespace(" 111111111111", false)]
    #[case::non_ascii_digits("١١١١١١١١١١١١١", false)]
    fn test_validate_isbn(#[case] isbn: &str, #[case] expected: bool) {
        assert_eq!(validate_isbn(isbn), expected);
        assert_eq!(check_isbn(isbn).is_ok(), expected);
    }

    #[rstest]
    #[case::plain("1968-11-01", true)]
    #[case::leap_year("2020-02-29", true)]
    #[case::non_leap_year("2021-02-29", false)]
    #[case::month_out_of_range("2021-13-01", false)]
    #[case::day_zero("2021-01-00", false)]
    #[case::thirty_day_month("2021-04-31", false)]
    #[case::too_few_parts("2021-01", false)]
    #[case::too_many_parts("2021-01-01-01", false)]
    #[case::no_separator("20210101", false)]
    #[case::letters("2021-ab-01", false)]
    #[case::signed("2021-+1-01", false)]
    #[case::empty_part("2021--01", false)]
    #[case::empty("", false)]
    #[case::five_digit_year("12345-06-07", false)]
    #[case::two_digit_year("21-06-07", false)]
    #[case::year_zero("0000-01-01", false)]
    #[case::first_year("0001-01-01", true)]
    #[case::last_year("9999-12-31", true)]
    #[case::single_digit_month_and_day("2021-6-7", true)]
    #[case::three_digit_day("2021-06-007", false)]
    fn test_validate_release_date(#[case] date: &str, #[case] expected: bool) {
        assert_eq!(validate_release_date(date), expected);
    }

    #[test]
    fn test_parse() {
        let actual = BookRequest::parse(&request().to_string()).unwrap();
        assert_eq!(BookItem::from(actual), book());
    }

    #[test]
    fn test_parse_accepts_integer_page_count() {
        let mut body = request();
        body["numberOfPages"] = json!(183);
        let actual = BookRequest::parse(&body.to_string()).unwrap();
        assert_eq!(actual.number_of_pages, "183");
    }

    #[rstest]
    #[case::not_json("{")]
    #[case::not_an_object("[]")]
    #[case::missing_field(r#"{"isbn": "1111111111111"}"#)]
    #[case::wrong_type(
        r#"{"name": 1, "isbn": "1111111111111", "authors": "a", "languages": "b",
            "countries": "c", "numberOfPages": "1", "releaseDate": "2020-01-01"}"#
    )]
    #[case::negative_page_count(
        r#"{"name": "n", "isbn": "1111111111111", "authors": "a", "languages": "b",
            "countries": "c", "numberOfPages": -1, "releaseDate": "2020-01-01"}"#
    )]
    fn test_parse_malformed(#[case] body: &str) {
        let actual = BookRequest::parse(body).unwrap_err();
        assert!(matches!(actual, Error::MalformedRequest(_)), "{actual:?}");
    }

    #[rstest]
    #[case::isbn("isbn", "12345", "invalid isbn 12345 must be a 13char digit")]
    #[case::release_date(
        "releaseDate",
        "2021-02-29",
        "releaseDate 2021-02-29 does not match YYYY-MM-DD (ISO 8601)"
    )]
    fn test_validate(#[case] field: &str, #[case] value: &str, #[case] expected: &str) {
        let mut body = request();
        body[field] = json!(value);
        let actual = BookRequest::parse(&body.to_string())
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(actual, Error::Validation(_)));
        assert_eq!(actual.to_string(), expected);
    }

    #[test]
    fn test_to_item() {
        let item = book().to_item().unwrap();
        assert_eq!(item.len(), 7);
        assert_eq!(
            item.get("book_name"),
            Some(&types::AttributeValue::S("A Wizard of Earthsea".to_string()))
        );
        assert_eq!(
            item.get("number_of_pages"),
            Some(&types::AttributeValue::S("183".to_string()))
        );
    }

    #[test]
    fn test_document_decodes_to_plain_strings() {
        let actual = codec::decode_document(&book().to_document()).unwrap();
        assert_eq!(actual["release_date"], json!("1968-11-01"));
        assert_eq!(actual["isbn"], json!("1111111111111"));
    }

    #[test]
    fn test_to_updates_skips_the_key() {
        let actual = book().to_updates();
        assert_eq!(actual.len(), 6);
        assert!(actual.iter().all(|(name, _)| name != "isbn"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_thirteen_digits_are_valid(isbn in "[0-9]{13}") {
            prop_assert!(validate_isbn(&isbn));
            prop_assert!(check_isbn(&isbn).is_ok());
        }

        #[test]
        fn prop_other_lengths_are_invalid(isbn in "[0-9]{0,12}|[0-9]{14,40}") {
            prop_assert!(!validate_isbn(&isbn));
        }

        #[test]
        fn prop_non_digits_are_invalid(
            digits in "[0-9]{12}",
            position in 0..=12usize,
            other in "[^0-9]",
        ) {
            let mut isbn = digits;
            isbn.insert_str(position, &other);
            prop_assert!(!validate_isbn(&isbn), "{}", isbn);
        }

        #[test]
        fn prop_any_string_is_valid_only_as_thirteen_digits(isbn in ".*") {
            let expected = isbn.chars().count() == ISBN_LENGTH
                && isbn.chars().all(|character| character.is_ascii_digit());
            prop_assert_eq!(validate_isbn(&isbn), expected);
        }
    }
}
