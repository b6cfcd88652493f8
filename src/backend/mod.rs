//! HTTP access to the hosted backend.
//!
//! [`SupabaseClient`] wraps the two APIs a reset needs: PostgREST under
//! `/rest/v1` for table rows and Storage under `/storage/v1` for photos.
//! Every call succeeds only on HTTP 200 or 204.

pub mod supabase;

pub use supabase::SupabaseClient;

use serde::Deserialize;

/// Largest page the storage list endpoint is asked for.
pub const LIST_PAGE_LIMIT: usize = 1000;

/// Row selection for a PATCH or DELETE against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// No predicate. PostgREST rejects this for DELETE unless the server
    /// has been configured to allow it.
    Unfiltered,
    /// `id=gte.<value>`. With the smallest possible id this matches every row.
    IdAtLeast(String),
    /// `id=eq.<value>`
    IdEquals(String),
}

impl RowFilter {
    /// Query string pair in PostgREST operator syntax.
    pub fn query_pair(&self) -> Option<(&'static str, String)> {
        match self {
            Self::Unfiltered => None,
            Self::IdAtLeast(min) => Some(("id", format!("gte.{min}"))),
            Self::IdEquals(id) => Some(("id", format!("eq.{id}"))),
        }
    }
}

impl std::fmt::Display for RowFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.query_pair() {
            Some((column, predicate)) => write!(f, "{column}={predicate}"),
            None => f.write_str("(all rows)"),
        }
    }
}

/// One entry from a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageObject {
    pub name: String,
}

/// Keep only listing entries that are objects with a string `name`.
///
/// Folder placeholders and anything else the API returns are skipped.
pub fn named_objects(entries: Vec<serde_json::Value>) -> Vec<StorageObject> {
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<StorageObject>(entry).ok())
        .collect()
}
