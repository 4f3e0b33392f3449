use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation};

/// Scan operation, following every page until the table is exhausted.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_books::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     read_args: read::common::ReadArgs {
///         table_name: "BooksTable".to_string(),
///         ..Default::default()
///     },
/// };
/// let items = scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Additional read operation arguments (table name, consistent read).
    pub read_args: read::common::ReadArgs,
}

impl Scan {
    /// Execute the scan operation and collect the items of all pages.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<Vec<common::Item>, error::SdkError<operation::scan::ScanError>> {
        let builder = client.scan();
        let mut paginator = crate::apply_read_operation!(builder, self.read_args)
            .into_paginator()
            .send();
        crate::collect_paginated_items!(paginator)
    }
}
