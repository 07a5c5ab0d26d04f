use std::io::Write;

use anyhow::Result;
use rat_runtime::GraphApi;

use crate::presentation::presenters::present_paths;
use crate::presentation::views::PathListView;

pub async fn handle(api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let paths = api.index().await?;
    tracing::debug!(count = paths.len(), "loaded path index");
    write!(out, "{}", PathListView::new(&present_paths(paths)))?;
    Ok(())
}
