use std::io::Write;

use anyhow::{Result, bail};
use rat_runtime::GraphApi;
use rat_types::path_segments;

pub async fn handle(api: &dyn GraphApi, path: &str, out: &mut dyn Write) -> Result<()> {
    if path_segments(path).is_empty() {
        bail!("refusing to delete the root node");
    }
    api.remove(path).await?;
    tracing::info!(path, "deleted node");
    writeln!(out, "deleted {}", path)?;
    Ok(())
}
