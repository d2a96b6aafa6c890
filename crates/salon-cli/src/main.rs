//! Salon CLI Application
//!
//! Command-line interface and MCP server for the salon appointment
//! scheduler.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, SalonMcpServer};
use renderer::TerminalRenderer;
use salon_core::{BusinessHours, Caller, SchedulerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        opening,
        closing,
        slot_minutes,
        role,
        user_id,
        command,
    } = Args::parse();

    let hours = BusinessHours::parse(&opening, &closing, slot_minutes)
        .context("Invalid business hours")?;

    let scheduler = SchedulerBuilder::new()
        .with_database_path(database_file)
        .with_business_hours(hours)
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(scheduler.clone(), renderer, Caller::new(user_id, role));

    info!("Salon started");

    match command {
        Some(Appointment { command }) => cli.handle_appointment_command(command).await,
        Some(Slot { command }) => cli.handle_slot_command(command).await,
        Some(Service { command }) => cli.handle_service_command(command).await,
        Some(Employee { command }) => cli.handle_employee_command(command).await,
        Some(Specialty { command }) => cli.handle_specialty_command(command).await,
        Some(Client { command }) => cli.handle_client_command(command).await,
        Some(Serve) => {
            info!("Starting salon MCP server");
            run_stdio_server(SalonMcpServer::new(scheduler))
                .await
                .context("MCP server failed")
        }
        None => cli.upcoming(Default::default()).await,
    }
}
