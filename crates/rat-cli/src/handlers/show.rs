use std::io::Write;

use anyhow::Result;
use rat_engine::Renderer;
use rat_runtime::GraphApi;

use crate::presentation::presenters::present_node;
use crate::presentation::views::NodeView;

pub struct ShowOptions {
    pub width: usize,
    pub preview_lines: usize,
    pub color: bool,
}

pub async fn handle(
    api: &dyn GraphApi,
    path: &str,
    options: &ShowOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let node = api.read(path).await?;
    let view_model = present_node(
        &Renderer::default(),
        &node,
        options.width,
        options.preview_lines,
    );
    write!(out, "{}", NodeView::new(&view_model).with_color(options.color))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rat_testing::fixtures;

    #[tokio::test]
    async fn test_show_renders_board_with_children() {
        let graph = fixtures::project_graph();
        let options = ShowOptions {
            width: 40,
            preview_lines: 2,
            color: false,
        };
        let mut out = Vec::new();
        handle(&graph, "board", &options, &mut out).await.unwrap();

        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        /board  id:board

        # Board

        Work in flight.

        todo                 done
        ───────────────────  ───────────────────
        ▪ parser             ▪ tui
        ▪ search

        done/               todo/
        ");
    }

    #[tokio::test]
    async fn test_show_missing_node_fails() {
        let graph = fixtures::project_graph();
        let options = ShowOptions {
            width: 40,
            preview_lines: 2,
            color: false,
        };
        let err = handle(&graph, "nope", &options, &mut Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
