//! MCP server for the salon scheduler
//!
//! Exposes booking, availability and slot management as Model Context
//! Protocol tools over stdio. Every tool delegates to [`handlers::McpHandlers`],
//! which shares one [`Scheduler`] across concurrent requests.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use salon_core::Scheduler;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

use handlers::{
    AppointmentsByDate, AppointmentsByEmployee, AvailableSlots, CreateAppointment, CreateClient,
    FindClient, GenerateSlots, Id, ListAppointments, ListSlots, McpResult, TransitionStatus,
    Upcoming, UpdateAppointment,
};

/// MCP server for the salon scheduler
#[derive(Clone)]
pub struct SalonMcpServer {
    scheduler: Arc<Scheduler>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SalonMcpServer {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.scheduler.clone())
    }

    #[tool(
        name = "create_appointment",
        description = "Book an appointment. Requires employee_id, service_id, date (YYYY-MM-DD) and start_time (HH:MM). Identify the client with client_id, or with client_name and client_phone for walk-ins (an existing client with that phone is reused). Duration, price and commission come from the service. Fails if the employee already has an overlapping booking or the slot is taken."
    )]
    async fn create_appointment(&self, params: Parameters<CreateAppointment>) -> McpResult {
        self.handlers().create_appointment(params).await
    }

    #[tool(
        name = "update_appointment",
        description = "Change an existing appointment. Only the fields you pass change. Moving it to another time, day or employee re-checks conflicts; changing the service re-resolves duration and price. Returns the updated appointment with a list of changes."
    )]
    async fn update_appointment(&self, params: Parameters<UpdateAppointment>) -> McpResult {
        self.handlers().update_appointment(params).await
    }

    #[tool(
        name = "delete_appointment",
        description = "Permanently delete an appointment by ID and free its slot. Client visit statistics are not changed; cancel instead to keep history."
    )]
    async fn delete_appointment(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_appointment(params).await
    }

    #[tool(
        name = "transition_status",
        description = "Set an appointment's status to 'scheduled', 'completed', 'canceled' or a custom value. Completing records a client visit and adds the price to the client's total spent; leaving 'completed' reverses that. Canceling frees the slot."
    )]
    async fn transition_status(&self, params: Parameters<TransitionStatus>) -> McpResult {
        self.handlers().transition_status(params).await
    }

    #[tool(
        name = "show_appointment",
        description = "Show one appointment with client, employee, service, time range, status, price and commission."
    )]
    async fn show_appointment(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_appointment(params).await
    }

    #[tool(
        name = "list_appointments",
        description = "List appointments newest first with optional filters: status, employee_id, from/to dates (YYYY-MM-DD, inclusive) and client (case-insensitive substring of name or phone). Paginated with page (from 1) and limit."
    )]
    async fn list_appointments(&self, params: Parameters<ListAppointments>) -> McpResult {
        self.handlers().list_appointments(params).await
    }

    #[tool(
        name = "appointments_by_date",
        description = "List every appointment on one day (YYYY-MM-DD) across all employees, ordered by start time."
    )]
    async fn appointments_by_date(&self, params: Parameters<AppointmentsByDate>) -> McpResult {
        self.handlers().appointments_by_date(params).await
    }

    #[tool(
        name = "appointments_by_employee",
        description = "List one employee's appointments, optionally limited to a single date, ordered by date and start time."
    )]
    async fn appointments_by_employee(
        &self,
        params: Parameters<AppointmentsByEmployee>,
    ) -> McpResult {
        self.handlers().appointments_by_employee(params).await
    }

    #[tool(
        name = "upcoming_appointments",
        description = "List upcoming non-canceled appointments from today on, earliest first. Optional employee_id, limit (default 10) and offset."
    )]
    async fn upcoming_appointments(&self, params: Parameters<Upcoming>) -> McpResult {
        self.handlers().upcoming_appointments(params).await
    }

    #[tool(
        name = "available_slots",
        description = "Compute the free start times for an employee on a date within business hours. Pass service_id to use that service's duration, and exclude_appointment_id when rescheduling an appointment so it does not block itself."
    )]
    async fn available_slots(&self, params: Parameters<AvailableSlots>) -> McpResult {
        self.handlers().available_slots(params).await
    }

    #[tool(
        name = "generate_slots",
        description = "Lay out bookable slot cells for employees over a date range (inclusive, at most one year). Existing cells are kept, so re-running is safe. Returns how many cells were created."
    )]
    async fn generate_slots(&self, params: Parameters<GenerateSlots>) -> McpResult {
        self.handlers().generate_slots(params).await
    }

    #[tool(
        name = "list_slots",
        description = "List an employee's slot cells for one date, marking each as free or taken."
    )]
    async fn list_slots(&self, params: Parameters<ListSlots>) -> McpResult {
        self.handlers().list_slots(params).await
    }

    #[tool(
        name = "list_services",
        description = "List the service catalog with durations and recommended prices."
    )]
    async fn list_services(&self) -> McpResult {
        self.handlers().list_services().await
    }

    #[tool(name = "list_employees", description = "List all employees.")]
    async fn list_employees(&self) -> McpResult {
        self.handlers().list_employees().await
    }

    #[tool(
        name = "create_client",
        description = "Register a client with name and phone. Phone numbers are unique."
    )]
    async fn create_client(&self, params: Parameters<CreateClient>) -> McpResult {
        self.handlers().create_client(params).await
    }

    #[tool(
        name = "find_client",
        description = "Look up a client by exact phone number, including visit count and total spent."
    )]
    async fn find_client(&self, params: Parameters<FindClient>) -> McpResult {
        self.handlers().find_client(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SalonMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "salon".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Salon appointment scheduler. Check available_slots before booking with \
                 create_appointment, and pass exclude_appointment_id when rescheduling. \
                 Dates are YYYY-MM-DD, times HH:MM, prices are in currency units with two decimals. \
                 Use transition_status to complete or cancel appointments so client statistics stay correct."
                    .to_string(),
            ),
        }
    }
}

/// Serves the MCP protocol on stdio until the client disconnects or a
/// termination signal arrives.
pub async fn run_stdio_server(server: SalonMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting salon MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
