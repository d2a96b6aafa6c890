//! Tool implementations for the MCP server
//!
//! Each handler unwraps its [`McpParams`], calls the shared [`Scheduler`]
//! and returns the rendered markdown as a text result.

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use salon_core::{
    display::{CreateResult, DeleteResult, UpdateResult},
    params as core, Scheduler,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// Adds the serde and schemars plumbing rmcp needs while passing the JSON
/// straight through to the wrapped core type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateAppointment = McpParams<core::CreateAppointment>;
pub type UpdateAppointment = McpParams<core::UpdateAppointment>;
pub type TransitionStatus = McpParams<core::TransitionStatus>;
pub type ListAppointments = McpParams<core::ListAppointments>;
pub type AppointmentsByDate = McpParams<core::AppointmentsByDate>;
pub type AppointmentsByEmployee = McpParams<core::AppointmentsByEmployee>;
pub type Upcoming = McpParams<core::Upcoming>;
pub type AvailableSlots = McpParams<core::AvailableSlots>;
pub type GenerateSlots = McpParams<core::GenerateSlots>;
pub type ListSlots = McpParams<core::ListSlots>;
pub type CreateClient = McpParams<core::CreateClient>;
pub type FindClient = McpParams<core::FindClient>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(result: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        result.to_string(),
    )]))
}

pub struct McpHandlers {
    scheduler: Arc<Scheduler>,
}

impl McpHandlers {
    pub fn new(scheduler: Arc<Scheduler>) -> Self {
        Self { scheduler }
    }

    pub async fn create_appointment(
        &self,
        Parameters(params): Parameters<CreateAppointment>,
    ) -> McpResult {
        debug!("create_appointment: {:?}", params);

        let appointment = self
            .scheduler
            .create_appointment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to book appointment", &e))?;
        text(CreateResult::new(appointment))
    }

    pub async fn update_appointment(
        &self,
        Parameters(params): Parameters<UpdateAppointment>,
    ) -> McpResult {
        debug!("update_appointment: {:?}", params);

        let inner = params.as_ref();
        let before = self
            .scheduler
            .show_appointment(&core::Id { id: inner.id })
            .await
            .map_err(|e| to_mcp_error("Failed to load appointment", &e))?;
        let after = self
            .scheduler
            .update_appointment(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to update appointment", &e))?;
        text(UpdateResult::between(&before, after))
    }

    pub async fn delete_appointment(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_appointment: {:?}", params);

        let appointment = self
            .scheduler
            .delete_appointment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete appointment", &e))?;
        text(DeleteResult::new(appointment))
    }

    pub async fn transition_status(
        &self,
        Parameters(params): Parameters<TransitionStatus>,
    ) -> McpResult {
        debug!("transition_status: {:?}", params);

        let transition = self
            .scheduler
            .transition_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change appointment status", &e))?;
        text(transition)
    }

    pub async fn show_appointment(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_appointment: {:?}", params);

        let appointment = self
            .scheduler
            .show_appointment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show appointment", &e))?;
        text(appointment)
    }

    pub async fn list_appointments(
        &self,
        Parameters(params): Parameters<ListAppointments>,
    ) -> McpResult {
        debug!("list_appointments: {:?}", params);

        let page = self
            .scheduler
            .list_appointments(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list appointments", &e))?;
        text(page)
    }

    pub async fn appointments_by_date(
        &self,
        Parameters(params): Parameters<AppointmentsByDate>,
    ) -> McpResult {
        debug!("appointments_by_date: {:?}", params);

        let appointments = self
            .scheduler
            .appointments_by_date(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list appointments", &e))?;
        text(appointments)
    }

    pub async fn appointments_by_employee(
        &self,
        Parameters(params): Parameters<AppointmentsByEmployee>,
    ) -> McpResult {
        debug!("appointments_by_employee: {:?}", params);

        let appointments = self
            .scheduler
            .appointments_by_employee(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list schedule", &e))?;
        text(appointments)
    }

    pub async fn upcoming_appointments(
        &self,
        Parameters(params): Parameters<Upcoming>,
    ) -> McpResult {
        debug!("upcoming_appointments: {:?}", params);

        let page = self
            .scheduler
            .upcoming_page(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list upcoming appointments", &e))?;
        text(format!("# Upcoming appointments\n\n{page}"))
    }

    pub async fn available_slots(
        &self,
        Parameters(params): Parameters<AvailableSlots>,
    ) -> McpResult {
        debug!("available_slots: {:?}", params);

        let slots = self
            .scheduler
            .available_slots(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to compute availability", &e))?;
        text(slots)
    }

    pub async fn generate_slots(&self, Parameters(params): Parameters<GenerateSlots>) -> McpResult {
        debug!("generate_slots: {:?}", params);

        let summary = self
            .scheduler
            .generate_slots(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate slots", &e))?;
        text(summary)
    }

    pub async fn list_slots(&self, Parameters(params): Parameters<ListSlots>) -> McpResult {
        debug!("list_slots: {:?}", params);

        let cells = self
            .scheduler
            .list_slots(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list slots", &e))?;
        text(cells)
    }

    pub async fn list_services(&self) -> McpResult {
        let services = self
            .scheduler
            .list_services()
            .await
            .map_err(|e| to_mcp_error("Failed to list services", &e))?;
        text(services)
    }

    pub async fn list_employees(&self) -> McpResult {
        let employees = self
            .scheduler
            .list_employees()
            .await
            .map_err(|e| to_mcp_error("Failed to list employees", &e))?;
        text(employees)
    }

    pub async fn create_client(&self, Parameters(params): Parameters<CreateClient>) -> McpResult {
        debug!("create_client: {:?}", params);

        let client = self
            .scheduler
            .create_client(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create client", &e))?;
        text(CreateResult::new(client))
    }

    pub async fn find_client(&self, Parameters(params): Parameters<FindClient>) -> McpResult {
        debug!("find_client: {:?}", params);

        let phone = params.as_ref().phone.clone();
        let client = self
            .scheduler
            .find_client(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to find client", &e))?;
        match client {
            Some(client) => text(client),
            None => text(format!("No client with phone {phone}")),
        }
    }
}
