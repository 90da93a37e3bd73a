pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod engine;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::api::handlers::settlements::parse_period;
use crate::api::models::PeriodParams;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init_db() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database_path())?;
    let conn = database::get_connection(&pool)?;
    database::setup::reset_database(&conn)
}

pub fn handle_settle(start: &str, end: &str, referee: Option<i64>) -> Result<()> {
    let params = PeriodParams {
        start: start.to_string(),
        end: end.to_string(),
    };
    let (period_start, period_end) = parse_period(&params)?;

    let config = AppConfig::new();
    let pool = database::create_pool(&config.database_path())?;
    let stores = database::SqliteStore::new(pool);

    let output = match referee {
        Some(referee_id) => {
            let settlement =
                engine::settlement::generate_for_referee(&stores, referee_id, period_start, period_end)?;
            serde_json::to_string_pretty(&settlement)?
        }
        None => {
            let report = engine::settlement::generate(&stores, period_start, period_end)?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{output}");
    Ok(())
}
