//! The reset sequence.
//!
//! A [`ResetPlan`] is the ordered list of [`Step`]s for one run: clear the
//! `race_state` pointers, delete every row of each race table child-first,
//! then (optionally) purge the photo bucket. [`run`] executes the steps one
//! request at a time. A rejected pointer reset or table delete stops the run
//! with [`ResetError::Fatal`]; a failed bucket purge is reported and recorded
//! in the [`ResetSummary`].

pub mod confirm;
pub mod storage;

pub use confirm::{confirm, CONFIRM_WORD};
pub use storage::{purge_bucket, BucketOutcome, PurgeStage};

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::backend::{RowFilter, SupabaseClient};
use crate::config::ResetConfig;
use crate::error::ResetError;
use crate::schema::{race_state_reset_body, Table, RACE_STATE_ID, RACE_STATE_TABLE};

/// One unit of work in a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Null the foreign keys on the `race_state` singleton.
    ResetRaceState,
    /// Delete every row of a table.
    DeleteRows(Table),
    /// Delete every object in a storage bucket.
    PurgeBucket(String),
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResetRaceState => write!(f, "reset {RACE_STATE_TABLE} pointers to null"),
            Self::DeleteRows(table) => write!(f, "delete all rows from {table}"),
            Self::PurgeBucket(bucket) => write!(f, "delete all objects in bucket {bucket}"),
        }
    }
}

/// Ordered steps plus the filter used for table deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPlan {
    pub steps: Vec<Step>,
    pub row_filter: RowFilter,
}

impl ResetPlan {
    /// Pointer reset, then every table in [`Table::DELETION_ORDER`], then the
    /// bucket purge if `photo_bucket` is given.
    pub fn new(row_filter: RowFilter, photo_bucket: Option<String>) -> Self {
        let mut steps = Vec::with_capacity(Table::DELETION_ORDER.len() + 2);
        steps.push(Step::ResetRaceState);
        steps.extend(Table::DELETION_ORDER.into_iter().map(Step::DeleteRows));
        if let Some(bucket) = photo_bucket {
            steps.push(Step::PurgeBucket(bucket));
        }
        Self { steps, row_filter }
    }

    pub fn from_config(config: &ResetConfig) -> Self {
        let bucket = config
            .reset
            .purge_photos
            .then(|| config.reset.bucket.clone());
        Self::new(config.row_filter(), bucket)
    }

    pub fn purges_photos(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Step::PurgeBucket(_)))
    }
}

/// What a completed run did.
#[derive(Debug, Default)]
pub struct ResetSummary {
    pub race_state_reset: bool,
    /// Tables emptied, in the order they were processed.
    pub tables_cleared: Vec<Table>,
    /// `None` when the plan had no bucket step.
    pub photos: Option<BucketOutcome>,
}

/// Execute `plan` against the backend, writing one status line per step to `out`.
///
/// Steps run strictly in order and each request completes before the next is sent.
pub async fn run<W: Write>(
    client: &SupabaseClient,
    plan: &ResetPlan,
    out: &mut W,
) -> Result<ResetSummary, ResetError> {
    let mut summary = ResetSummary::default();

    for step in &plan.steps {
        info!(%step, "running");
        match step {
            Step::ResetRaceState => {
                let filter = RowFilter::IdEquals(RACE_STATE_ID.into());
                if let Err(source) = client
                    .patch_rows(RACE_STATE_TABLE, &filter, &race_state_reset_body())
                    .await
                {
                    debug!(%source, "resetting {RACE_STATE_TABLE} failed");
                    writeln!(out, "  ERROR resetting {RACE_STATE_TABLE}: {source}")?;
                    return Err(ResetError::Fatal {
                        action: "resetting",
                        target: RACE_STATE_TABLE.into(),
                        source,
                    });
                }
                writeln!(out, "  ✓ {RACE_STATE_TABLE} (reset to nulls)")?;
                summary.race_state_reset = true;
            }
            Step::DeleteRows(table) => {
                if let Err(source) = client.delete_rows(table.as_str(), &plan.row_filter).await {
                    debug!(%table, %source, "deleting rows failed");
                    writeln!(out, "  ERROR deleting {table}: {source}")?;
                    return Err(ResetError::Fatal {
                        action: "deleting",
                        target: table.to_string(),
                        source,
                    });
                }
                writeln!(out, "  ✓ {table}")?;
                summary.tables_cleared.push(*table);
            }
            Step::PurgeBucket(bucket) => {
                let outcome = purge_bucket(client, bucket, out).await?;
                summary.photos = Some(outcome);
            }
        }
    }

    Ok(summary)
}

/// Prompt on `input`, then run `plan` if the answer is [`CONFIRM_WORD`].
///
/// Returns `None` when the user declines; no request is sent in that case.
pub async fn interactive<R: BufRead, W: Write>(
    client: &SupabaseClient,
    plan: &ResetPlan,
    input: &mut R,
    out: &mut W,
) -> Result<Option<ResetSummary>, ResetError> {
    if !confirm(input, out, client.base_url())? {
        writeln!(out, "Aborted.")?;
        return Ok(None);
    }

    writeln!(out)?;
    writeln!(out, "Deleting data (order respects foreign keys)...")?;
    run(client, plan, out).await.map(Some)
}
