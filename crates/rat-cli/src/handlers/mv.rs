use std::io::Write;

use anyhow::Result;
use rat_runtime::GraphApi;

pub async fn handle(api: &dyn GraphApi, id: &str, new_path: &str, out: &mut dyn Write) -> Result<()> {
    api.move_node(id, new_path).await?;
    tracing::info!(id, new_path, "moved node");
    writeln!(out, "moved {} to {}", id, new_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rat_testing::fixtures;

    #[tokio::test]
    async fn test_mv_rewrites_path() {
        let graph = fixtures::project_graph();
        let mut out = Vec::new();
        handle(&graph, "id:board/todo/parser", "board/done/parser", &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "moved id:board/todo/parser to board/done/parser\n"
        );
        assert!(graph.node("board/done/parser").is_some());
    }
}
