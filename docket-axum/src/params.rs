use std::collections::HashMap;

use docket_core::Pagination;

/// Read `limit`/`offset` from a query map.
///
/// Unparseable values are treated as absent; [`Pagination::new`] then applies
/// the defaults.
pub fn pagination(query: &HashMap<String, String>) -> Pagination {
    let read = |key: &str| query.get(key).and_then(|v| v.trim().parse::<i64>().ok());
    Pagination::new(read("limit"), read("offset"))
}
