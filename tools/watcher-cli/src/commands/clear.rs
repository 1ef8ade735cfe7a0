//! Remove every stored deal.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use watcher_store::DealStore;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
///
/// Writes the data file directly. A running server does not see this as one
/// of its own mutations, so prefer `DELETE /api/deals` while it is up.
pub async fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let store = ctx.file_store();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all deals from {}?", store.path().display()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    store
        .clear()
        .await
        .with_context(|| format!("Failed to clear {}", store.path().display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "success": true,
            "message": "All deals cleared",
        }));
    } else {
        ctx.output.success("All deals cleared");
    }

    Ok(())
}
