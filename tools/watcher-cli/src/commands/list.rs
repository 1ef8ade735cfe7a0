//! Print the stored deals.

use anyhow::{bail, Context as _, Result};
use watcher_deals::Deal;
use watcher_store::DealStore;

use super::ListArgs;
use crate::context::Context;
use crate::output::{status_badge, truncate};

const WIDTHS: [usize; 5] = [12, 10, 12, 40, 10];

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = ctx.file_store();
    ctx.output.debug(&format!("Reading {}", store.path().display()));

    let deals = match store.load().await {
        Ok(deals) => deals,
        Err(err) if err.is_corrupt() || err.is_unrecognized() => {
            bail!(
                "{}. Fix the file by hand or run `asin-watcher clear` to start over.",
                err
            )
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read deals from {}", store.path().display()))
        }
    };
    let deals = select(deals, &args);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deals": deals }));
        return Ok(());
    }

    if deals.is_empty() {
        ctx.output.info("No deals stored");
        return Ok(());
    }

    ctx.output.header(&format!("Deals ({})", deals.len()));
    ctx.output.table_row(&["ASIN", "PRICE", "CODE", "TITLE", "STATUS"], &WIDTHS);

    for deal in &deals {
        let price = deal.price.as_ref().map(ToString::to_string).unwrap_or_default();
        let title = truncate(deal.title.as_deref().unwrap_or(""), WIDTHS[3]);
        let badge = status_badge(deal.effective_status());
        ctx.output.table_row(
            &[
                deal.asin.as_str(),
                price.as_str(),
                deal.code.as_deref().unwrap_or("-"),
                title.as_str(),
                badge.as_str(),
            ],
            &WIDTHS,
        );
    }

    Ok(())
}

fn select(deals: Vec<Deal>, args: &ListArgs) -> Vec<Deal> {
    deals
        .into_iter()
        .filter(|deal| args.status.map_or(true, |status| deal.effective_status() == status))
        .take(args.limit.unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use watcher_deals::{ingest_at, DealStatus, PartialDeal};

    fn args(status: Option<DealStatus>, limit: Option<usize>) -> ListArgs {
        ListArgs { status, limit }
    }

    fn sample() -> Vec<Deal> {
        let complete = PartialDeal::new("B001")
            .with_title("Widget")
            .with_price("9.99")
            .with_code("SAVE10");
        let deals = ingest_at(complete, Vec::new(), 1).unwrap().deals;
        let deals = ingest_at(PartialDeal::new("B002"), deals, 2).unwrap().deals;
        ingest_at(PartialDeal::new("B003"), deals, 3).unwrap().deals
    }

    #[test]
    fn test_select_all_keeps_order() {
        let asins: Vec<_> = select(sample(), &args(None, None))
            .into_iter()
            .map(|d| d.asin.into_inner())
            .collect();

        assert_eq!(asins, vec!["B003", "B002", "B001"]);
    }

    #[test]
    fn test_select_by_status() {
        let ready = select(sample(), &args(Some(DealStatus::Ready), None));
        let incomplete = select(sample(), &args(Some(DealStatus::Incomplete), None));

        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].asin.as_str(), "B001");
        assert_eq!(incomplete.len(), 2);
    }

    #[test]
    fn test_select_limit() {
        assert_eq!(select(sample(), &args(None, Some(2))).len(), 2);
    }
}
