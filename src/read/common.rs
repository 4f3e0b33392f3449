/// Arguments shared by read operations (GetItem, Scan).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReadArgs {
    /// Whether to use a consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub consistent_read: Option<bool>,
    /// The name of the table to read from.
    pub table_name: String,
}

/// collect every page of a paginated output into its items
#[macro_export]
macro_rules! collect_paginated_items {
    ($paginator:expr) => {{
        let mut items = Vec::new();
        while let Some(page) = $paginator.next().await {
            if let Some(page_items) = page?.items {
                items.extend(page_items);
            }
        }
        Ok(items)
    }};
}

/// apply common read operation settings to a builder
#[macro_export]
macro_rules! apply_read_operation {
    ($builder:expr, $read_args:expr) => {
        $builder
            .set_consistent_read($read_args.consistent_read)
            .table_name($read_args.table_name)
    };
}
