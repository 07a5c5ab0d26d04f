use is_terminal::IsTerminal;
use std::sync::Arc;

use anyhow::Result;
use rat_runtime::config::resolve_config_path;
use rat_runtime::{Config, GraphApi, HttpGraphApi};

use crate::args::{Cli, Commands};
use crate::handlers;
use crate::handlers::show::ShowOptions;
use crate::logging::{self, LogSink};

const DEFAULT_WIDTH: usize = 80;

pub fn run(cli: Cli) -> Result<()> {
    // The browser owns the screen, so its logs go to a file.
    let sink = match cli.command {
        None | Some(Commands::Open { .. }) => LogSink::File,
        Some(_) => LogSink::Stderr,
    };
    if let Some(log_file) = logging::init(cli.log_level, sink)? {
        tracing::debug!(path = %log_file.display(), "logging to file");
    }

    let config = load_config(&cli)?;
    tracing::debug!(server = %config.server.url, "configuration loaded");
    let api: Arc<dyn GraphApi> = Arc::new(HttpGraphApi::new(&config.server)?);

    let command = cli.command.unwrap_or(Commands::Open { path: None });
    if let Commands::Open { path } = command {
        return handlers::open::handle(api, &config, path);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();

    runtime.block_on(async {
        match command {
            // Handled above.
            Commands::Open { .. } => Ok(()),
            Commands::Show { path, width } => {
                let options = ShowOptions {
                    width: width.unwrap_or_else(terminal_width),
                    preview_lines: config.view.child_preview_lines,
                    color,
                };
                handlers::show::handle(api.as_ref(), &path, &options, &mut out).await
            }
            Commands::Index => handlers::index::handle(api.as_ref(), &mut out).await,
            Commands::Search { query } => {
                handlers::search::handle(api.as_ref(), &query, &mut out).await
            }
            Commands::New { parent, name } => {
                handlers::new::handle(api.as_ref(), &parent, &name, &mut out).await
            }
            Commands::Rm { path } => handlers::rm::handle(api.as_ref(), &path, &mut out).await,
            Commands::Mv { id, new_path } => {
                handlers::mv::handle(api.as_ref(), &id, &new_path, &mut out).await
            }
        }
    })
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = resolve_config_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&path)?;
    config.apply_env();
    config.apply_server_flag(cli.server.as_deref());
    config.validate()?;
    Ok(config)
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| usize::from(w))
        .unwrap_or(DEFAULT_WIDTH)
}
