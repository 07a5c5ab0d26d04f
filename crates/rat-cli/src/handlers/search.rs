use std::io::Write;

use anyhow::Result;
use rat_runtime::GraphApi;

use crate::presentation::presenters::present_paths;
use crate::presentation::views::PathListView;

pub async fn handle(api: &dyn GraphApi, query: &str, out: &mut dyn Write) -> Result<()> {
    let results = api.search(query).await?;
    if results.is_empty() {
        eprintln!("no nodes match '{}'", query);
    }
    write!(out, "{}", PathListView::new(&present_paths(results)))?;
    Ok(())
}
