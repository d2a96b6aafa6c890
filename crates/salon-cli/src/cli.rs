//! Command handlers for the salon CLI
//!
//! Each handler converts clap arguments into core parameters, calls the
//! scheduler and renders the markdown result.

use anyhow::{Context, Result};
use salon_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::{AppointmentsByEmployee, FindClient, Id, ListAppointments, Upcoming},
    Caller, Scheduler,
};

use crate::{
    args::{
        AppointmentCommands, ClientCommands, EmployeeCommands, ServiceCommands, SlotCommands,
        SpecialtyCommands,
    },
    renderer::TerminalRenderer,
};

/// CLI handler holding the scheduler, the renderer and the caller identity.
pub struct Cli {
    scheduler: Scheduler,
    renderer: TerminalRenderer,
    caller: Caller,
}

impl Cli {
    pub fn new(scheduler: Scheduler, renderer: TerminalRenderer, caller: Caller) -> Self {
        Self {
            scheduler,
            renderer,
            caller,
        }
    }

    pub async fn handle_appointment_command(&self, command: AppointmentCommands) -> Result<()> {
        match command {
            AppointmentCommands::Book(args) => {
                let appointment = self
                    .scheduler
                    .create_appointment(&args.into())
                    .await
                    .context("Failed to book appointment")?;
                self.renderer
                    .render(&CreateResult::new(appointment).to_string())
            }
            AppointmentCommands::Update(args) => {
                let id = Id { id: args.id };
                let before = self
                    .scheduler
                    .show_appointment(&id)
                    .await
                    .context("Failed to load appointment")?;
                let after = self
                    .scheduler
                    .update_appointment(&args.into())
                    .await
                    .context("Failed to update appointment")?;
                self.renderer
                    .render(&UpdateResult::between(&before, after).to_string())
            }
            AppointmentCommands::Status(args) => {
                let transition = self
                    .scheduler
                    .transition_status(&args.into())
                    .await
                    .context("Failed to change appointment status")?;
                self.renderer.render(&transition.to_string())
            }
            AppointmentCommands::Show(args) => {
                let appointment = self
                    .scheduler
                    .show_appointment(&args.into())
                    .await
                    .context("Failed to show appointment")?;
                self.renderer.render(&appointment.to_string())
            }
            AppointmentCommands::Delete(args) => {
                let appointment = self
                    .scheduler
                    .delete_appointment(&args.into())
                    .await
                    .context("Failed to delete appointment")?;
                self.renderer
                    .render(&DeleteResult::new(appointment).to_string())
            }
            AppointmentCommands::List(args) => self.list_appointments(args.into()).await,
            AppointmentCommands::Day(args) => {
                let appointments = self
                    .scheduler
                    .appointments_by_date(&args.into())
                    .await
                    .context("Failed to list appointments")?;
                self.renderer.render(&appointments.to_string())
            }
            AppointmentCommands::Schedule(args) => {
                let mut params: AppointmentsByEmployee = args.into();
                params.employee_id = self
                    .caller
                    .scope_employee(Some(params.employee_id))
                    .unwrap_or(params.employee_id);
                let appointments = self
                    .scheduler
                    .appointments_by_employee(&params)
                    .await
                    .context("Failed to list schedule")?;
                self.renderer.render(&appointments.to_string())
            }
            AppointmentCommands::Upcoming(args) => self.upcoming(args.into()).await,
            AppointmentCommands::Available(args) => {
                let slots = self
                    .scheduler
                    .available_slots(&args.into())
                    .await
                    .context("Failed to compute availability")?;
                self.renderer.render(&slots.to_string())
            }
        }
    }

    /// Filtered listing, restricted to the caller's own bookings for
    /// employees.
    pub async fn list_appointments(&self, mut params: ListAppointments) -> Result<()> {
        params.employee_id = self.caller.scope_employee(params.employee_id);
        let page = self
            .scheduler
            .list_appointments(&params)
            .await
            .context("Failed to list appointments")?;
        self.renderer.render(&page.to_string())
    }

    /// Upcoming appointments, restricted to the caller's own bookings for
    /// employees.
    pub async fn upcoming(&self, mut params: Upcoming) -> Result<()> {
        params.employee_id = self.caller.scope_employee(params.employee_id);
        let page = self
            .scheduler
            .upcoming_page(&params)
            .await
            .context("Failed to list upcoming appointments")?;
        self.renderer
            .render(&format!("# Upcoming appointments\n\n{page}"))
    }

    pub async fn handle_slot_command(&self, command: SlotCommands) -> Result<()> {
        match command {
            SlotCommands::Generate(args) => {
                let summary = self
                    .scheduler
                    .generate_slots(&args.into())
                    .await
                    .context("Failed to generate slots")?;
                self.renderer.render(&summary.to_string())
            }
            SlotCommands::List(args) => {
                let cells = self
                    .scheduler
                    .list_slots(&args.into())
                    .await
                    .context("Failed to list slots")?;
                self.renderer.render(&cells.to_string())
            }
        }
    }

    pub async fn handle_service_command(&self, command: ServiceCommands) -> Result<()> {
        match command {
            ServiceCommands::Add(args) => {
                let service = self
                    .scheduler
                    .add_service(&args.into())
                    .await
                    .context("Failed to add service")?;
                self.renderer
                    .render(&CreateResult::new(service).to_string())
            }
            ServiceCommands::List => {
                let services = self
                    .scheduler
                    .list_services()
                    .await
                    .context("Failed to list services")?;
                self.renderer.render(&services.to_string())
            }
            ServiceCommands::Show(args) => {
                let service = self
                    .scheduler
                    .get_service(&args.into())
                    .await
                    .context("Failed to show service")?;
                self.renderer.render(&service.to_string())
            }
        }
    }

    pub async fn handle_employee_command(&self, command: EmployeeCommands) -> Result<()> {
        match command {
            EmployeeCommands::Add(args) => {
                let employee = self
                    .scheduler
                    .add_employee(&args.into())
                    .await
                    .context("Failed to add employee")?;
                self.renderer
                    .render(&CreateResult::new(employee).to_string())
            }
            EmployeeCommands::List => {
                let employees = self
                    .scheduler
                    .list_employees()
                    .await
                    .context("Failed to list employees")?;
                self.renderer.render(&employees.to_string())
            }
            EmployeeCommands::Show(args) => {
                let employee = self
                    .scheduler
                    .get_employee(&args.into())
                    .await
                    .context("Failed to show employee")?;
                self.renderer.render(&employee.to_string())
            }
        }
    }

    pub async fn handle_specialty_command(&self, command: SpecialtyCommands) -> Result<()> {
        match command {
            SpecialtyCommands::Set(args) => {
                let specialty = self
                    .scheduler
                    .set_specialty(&args.into())
                    .await
                    .context("Failed to set specialty")?;
                let message = specialty.to_string().trim_end().to_string();
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
        }
    }

    pub async fn handle_client_command(&self, command: ClientCommands) -> Result<()> {
        match command {
            ClientCommands::Add(args) => {
                let client = self
                    .scheduler
                    .create_client(&args.into())
                    .await
                    .context("Failed to register client")?;
                self.renderer
                    .render(&CreateResult::new(client).to_string())
            }
            ClientCommands::Find(args) => {
                let params: FindClient = args.into();
                match self
                    .scheduler
                    .find_client(&params)
                    .await
                    .context("Failed to look up client")?
                {
                    Some(client) => self.renderer.render(&client.to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "No client with phone {}",
                            params.phone
                        ))
                        .to_string(),
                    ),
                }
            }
            ClientCommands::Show(args) => {
                let client = self
                    .scheduler
                    .get_client(&args.into())
                    .await
                    .context("Failed to show client")?;
                self.renderer.render(&client.to_string())
            }
        }
    }
}
