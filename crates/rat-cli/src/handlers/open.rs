use is_terminal::IsTerminal;
use std::sync::Arc;

use anyhow::{Result, bail};
use rat_runtime::{Config, Dispatcher, GraphApi, Session};

use crate::presentation::renderers::{App, TuiRenderer};

/// Run the interactive browser, starting at `path` or the configured start
/// path.
pub fn handle(api: Arc<dyn GraphApi>, config: &Config, path: Option<String>) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        bail!("rat open needs an interactive terminal; use `rat show` for plain output");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let (dispatcher, rx) = Dispatcher::new(api);
        let mut session = Session::new(dispatcher, config);
        let start = path.unwrap_or_else(|| config.view.start_path.clone());
        tracing::info!(path = %start, "opening browser");
        session.navigate(&start);

        let app = App::new(session, config.view.child_preview_lines);
        TuiRenderer::new(app).run(rx).await
    })
}
