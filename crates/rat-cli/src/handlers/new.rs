use std::io::Write;

use anyhow::{Result, bail};
use rat_runtime::GraphApi;

pub async fn handle(api: &dyn GraphApi, parent: &str, name: &str, out: &mut dyn Write) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("node name must not be empty");
    }
    if name.contains('/') {
        bail!("node name must not contain '/': {}", name);
    }

    let node = api.create(parent, name).await?;
    tracing::info!(path = %node.path, id = %node.id, "created node");
    writeln!(out, "{}", node.path)?;
    Ok(())
}
