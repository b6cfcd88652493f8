//! CLI entry for a reset: confirm on stdin, then run the plan.

use anyhow::{Context, Result};

use derby_reset::backend::SupabaseClient;
use derby_reset::config::ResetConfig;
use derby_reset::reset::{self, BucketOutcome, ResetPlan};

/// Delete all race data after user confirmation.
///
/// Declining the prompt is not an error.
pub async fn reset(config: &ResetConfig) -> Result<()> {
    let client = SupabaseClient::new(&config.backend).context("failed to build backend client")?;
    let plan = ResetPlan::from_config(config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let Some(summary) = reset::interactive(&client, &plan, &mut stdin.lock(), &mut stdout)
        .await
        .context("reset incomplete; backend may be partially cleared")?
    else {
        return Ok(());
    };

    println!();
    println!("Database cleared successfully.");
    if let Some(BucketOutcome::Failed { .. }) = summary.photos {
        println!("Some photos could not be removed; see the errors above.");
    }
    println!();
    Ok(())
}

/// Print the steps a reset would run without contacting the backend.
pub fn dry_run(config: &ResetConfig) {
    let plan = ResetPlan::from_config(config);
    println!("Dry run: no requests will be sent.");
    println!("Backend: {}", config.backend.url);
    println!("Row filter: {}", plan.row_filter);
    println!();
    for (i, step) in plan.steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
}
