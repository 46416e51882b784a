use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, WriteLogger};
use vbrowse::OverlayConfig;
use vbrowse_tui::app::App;
use vbrowse_tui::cli::{Cli, load_config};
use vbrowse_tui::error::AppError;
use vbrowse_tui::table::DemoTable;
use vbrowse_tui::terminal::Terminal;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let log_file = File::create(&cli.log_file).map_err(|source| AppError::Read {
        path: cli.log_file.clone(),
        source,
    })?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OverlayConfig::default(),
    };
    let table = match &cli.data {
        Some(path) => DemoTable::load(path, cli.page_size)?,
        None => DemoTable::generate(cli.rows, cli.page_size),
    };
    log::info!("starting with {} columns", table.columns_meta().len());

    let app = App::new(table, config)?;
    let mut terminal = Terminal::new()?;
    app.run(&mut terminal).await
}
