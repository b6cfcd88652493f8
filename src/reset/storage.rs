//! Photo bucket cleanup.
//!
//! Unlike table deletes, failures here are reported and the run continues.

use std::io::Write;

use tracing::{info, warn};

use crate::backend::{SupabaseClient, LIST_PAGE_LIMIT};
use crate::error::BackendError;

/// Which request of the purge failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeStage {
    List,
    Delete,
}

/// How a bucket purge ended.
#[derive(Debug)]
pub enum BucketOutcome {
    /// The listing returned no named objects; no delete was sent.
    AlreadyEmpty,
    /// This many objects were removed in one bulk delete.
    Deleted(usize),
    Failed {
        stage: PurgeStage,
        error: BackendError,
    },
}

impl BucketOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// List the first page of `bucket` and delete every named object in it,
/// printing one status line to `out`.
pub async fn purge_bucket<W: Write>(
    client: &SupabaseClient,
    bucket: &str,
    out: &mut W,
) -> std::io::Result<BucketOutcome> {
    let objects = match client.list_objects(bucket, LIST_PAGE_LIMIT, 0).await {
        Ok(objects) => objects,
        Err(error) => {
            warn!(bucket, %error, "listing bucket failed");
            writeln!(out, "  ERROR listing {bucket}: {error}")?;
            return Ok(BucketOutcome::Failed {
                stage: PurgeStage::List,
                error,
            });
        }
    };

    if objects.is_empty() {
        info!(bucket, "bucket already empty");
        writeln!(out, "  ✓ {bucket} (already empty)")?;
        return Ok(BucketOutcome::AlreadyEmpty);
    }

    if objects.len() == LIST_PAGE_LIMIT {
        warn!(bucket, "listing hit the page limit; objects past the first page are left behind");
    }

    let names: Vec<String> = objects.into_iter().map(|o| o.name).collect();
    if let Err(error) = client.delete_objects(bucket, &names).await {
        warn!(bucket, %error, "deleting bucket objects failed");
        writeln!(out, "  ERROR deleting files in {bucket}: {error}")?;
        return Ok(BucketOutcome::Failed {
            stage: PurgeStage::Delete,
            error,
        });
    }

    info!(bucket, deleted = names.len(), "bucket purged");
    writeln!(out, "  ✓ {bucket} ({} photo(s) deleted)", names.len())?;
    Ok(BucketOutcome::Deleted(names.len()))
}
