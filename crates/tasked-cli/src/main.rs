//! tasked command-line application
//!
//! Keeps plans of ordered steps in a SQLite database and serves them to MCP
//! clients over stdio.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands, ListPlansArgs};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TaskedMcpServer};
use renderer::TerminalRenderer;
use tasked_core::PlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("failed to initialize planner")?;

    info!("using database {}", planner.database_path().display());

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, TerminalRenderer::new(!no_color))
                .handle_plan_command(command)
                .await
        }
        Some(Mcp) => {
            run_stdio_server(TaskedMcpServer::new(planner))
                .await
                .context("MCP server failed")?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            Cli::new(planner, TerminalRenderer::new(!no_color))
                .list_plans(&ListPlansArgs { timestamps: false })
                .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
