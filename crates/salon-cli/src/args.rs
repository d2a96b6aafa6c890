//! Command-line argument definitions using clap
//!
//! Each subcommand has a clap-derived argument struct that converts into the
//! framework-free parameter type from `salon_core::params` with `From`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Scheduler
//! ```
//!
//! Dates are `YYYY-MM-DD` and times `HH:MM`; both are validated by the core.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use salon_core::{params::*, Money, Role};

/// Appointment scheduling for salon-type businesses
///
/// Books appointments against per-employee slot grids, rejects double
/// bookings, derives price and commission from the service catalog and keeps
/// client visit statistics in step with appointment status. Runs either as
/// a command-line tool or as an MCP (Model Context Protocol) server.
#[derive(Parser)]
#[command(version, about, name = "salon")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/salon/salon.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Opening time used for availability (HH:MM)
    #[arg(long, global = true, default_value = "08:00")]
    pub opening: String,

    /// Closing time used for availability (HH:MM)
    #[arg(long, global = true, default_value = "18:00")]
    pub closing: String,

    /// Slot granularity in minutes
    #[arg(long, global = true, default_value_t = 30)]
    pub slot_minutes: u32,

    /// Role of the caller: owner, manager or employee
    #[arg(long, global = true, default_value = "owner")]
    pub role: Role,

    /// Employee ID of the caller; employees only see their own schedule
    #[arg(long, global = true)]
    pub user_id: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the salon CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Book, change and query appointments
    #[command(alias = "a")]
    Appointment {
        #[command(subcommand)]
        command: AppointmentCommands,
    },
    /// Generate and inspect slot grids
    Slot {
        #[command(subcommand)]
        command: SlotCommands,
    },
    /// Manage the service catalog
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Manage employees
    Employee {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Set commission rates
    Specialty {
        #[command(subcommand)]
        command: SpecialtyCommands,
    },
    /// Manage clients
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Appointments
// ============================================================================

/// Book a new appointment
///
/// Give either --client-id or both --client-name and --client-phone. A
/// walk-in with a known phone number is matched to the existing client.
#[derive(ClapArgs)]
pub struct BookArgs {
    /// Employee performing the service
    pub employee_id: u64,
    /// Service to book
    pub service_id: u64,
    /// Day of the appointment (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM)
    pub start_time: String,
    #[arg(long)]
    pub client_id: Option<u64>,
    #[arg(long)]
    pub client_name: Option<String>,
    #[arg(long)]
    pub client_phone: Option<String>,
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Initial status (default: scheduled)
    #[arg(long)]
    pub status: Option<String>,
}

impl From<BookArgs> for CreateAppointment {
    fn from(val: BookArgs) -> Self {
        CreateAppointment {
            employee_id: val.employee_id,
            service_id: val.service_id,
            date: val.date,
            start_time: val.start_time,
            client_id: val.client_id,
            client_name: val.client_name,
            client_phone: val.client_phone,
            notes: val.notes,
            status: val.status,
        }
    }
}

/// Change an existing appointment
///
/// Only the given fields change. A new service re-prices the appointment; a
/// new service or employee recomputes the commission.
#[derive(ClapArgs)]
pub struct UpdateArgs {
    /// Appointment ID
    pub id: u64,
    #[arg(long)]
    pub employee_id: Option<u64>,
    #[arg(long)]
    pub service_id: Option<u64>,
    /// New day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// New start time (HH:MM)
    #[arg(long)]
    pub start_time: Option<String>,
    #[arg(long)]
    pub client_id: Option<u64>,
    #[arg(long)]
    pub status: Option<String>,
    /// New notes; an empty string clears them
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<UpdateArgs> for UpdateAppointment {
    fn from(val: UpdateArgs) -> Self {
        UpdateAppointment {
            id: val.id,
            employee_id: val.employee_id,
            service_id: val.service_id,
            date: val.date,
            start_time: val.start_time,
            client_id: val.client_id,
            status: val.status,
            notes: val.notes,
        }
    }
}

/// Change an appointment's status
///
/// Completing a scheduled appointment records a visit for the client;
/// canceling a completed one revokes it.
#[derive(ClapArgs)]
pub struct StatusArgs {
    /// Appointment ID
    pub id: u64,
    /// scheduled, completed, canceled or a custom status
    pub status: String,
}

impl From<StatusArgs> for TransitionStatus {
    fn from(val: StatusArgs) -> Self {
        TransitionStatus {
            id: val.id,
            status: val.status,
        }
    }
}

#[derive(ClapArgs)]
pub struct IdArgs {
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// List appointments, newest first
#[derive(ClapArgs)]
pub struct ListArgs {
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub employee_id: Option<u64>,
    /// First day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Part of the client's name
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<ListArgs> for ListAppointments {
    fn from(val: ListArgs) -> Self {
        ListAppointments {
            status: val.status,
            employee_id: val.employee_id,
            date_from: val.from,
            date_to: val.to,
            client_name: val.client,
            page: val.page,
            limit: val.limit,
        }
    }
}

/// Show every appointment on one day
#[derive(ClapArgs)]
pub struct DayArgs {
    /// Day (YYYY-MM-DD)
    pub date: String,
}

impl From<DayArgs> for AppointmentsByDate {
    fn from(val: DayArgs) -> Self {
        AppointmentsByDate { date: val.date }
    }
}

/// Show one employee's schedule
#[derive(ClapArgs)]
pub struct ScheduleArgs {
    pub employee_id: u64,
    /// Restrict to one day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

impl From<ScheduleArgs> for AppointmentsByEmployee {
    fn from(val: ScheduleArgs) -> Self {
        AppointmentsByEmployee {
            employee_id: val.employee_id,
            date: val.date,
        }
    }
}

/// Show upcoming appointments
#[derive(ClapArgs)]
pub struct UpcomingArgs {
    #[arg(long)]
    pub employee_id: Option<u64>,
    /// Number of appointments to show (default 10)
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,
    /// Skip this many appointments
    #[arg(long)]
    pub offset: Option<u32>,
}

impl From<UpcomingArgs> for Upcoming {
    fn from(val: UpcomingArgs) -> Self {
        Upcoming {
            employee_id: val.employee_id,
            limit: val.limit,
            offset: val.offset,
        }
    }
}

/// Show start times where a booking fits
#[derive(ClapArgs)]
pub struct AvailableArgs {
    pub employee_id: u64,
    /// Day (YYYY-MM-DD)
    pub date: String,
    /// Use this service's duration instead of the slot length
    #[arg(long)]
    pub service_id: Option<u64>,
    /// Ignore this appointment, e.g. when rescheduling it
    #[arg(long)]
    pub exclude: Option<u64>,
}

impl From<AvailableArgs> for AvailableSlots {
    fn from(val: AvailableArgs) -> Self {
        AvailableSlots {
            employee_id: val.employee_id,
            date: val.date,
            service_id: val.service_id,
            exclude_appointment_id: val.exclude,
        }
    }
}

#[derive(Subcommand)]
pub enum AppointmentCommands {
    /// Book a new appointment
    #[command(alias = "b")]
    Book(BookArgs),
    /// Change an appointment
    #[command(alias = "u")]
    Update(UpdateArgs),
    /// Change an appointment's status
    Status(StatusArgs),
    /// Show one appointment
    #[command(alias = "s")]
    Show(IdArgs),
    /// Delete an appointment and free its slot
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// List appointments with filters
    #[command(aliases = ["l", "ls"])]
    List(ListArgs),
    /// All appointments on one day
    Day(DayArgs),
    /// One employee's schedule
    Schedule(ScheduleArgs),
    /// Upcoming appointments
    Upcoming(UpcomingArgs),
    /// Free start times for an employee
    Available(AvailableArgs),
}

// ============================================================================
// Slot grid
// ============================================================================

/// Generate slot cells for employees over a date range
///
/// Existing cells are kept as they are, so running this twice is harmless.
#[derive(ClapArgs)]
pub struct GenerateArgs {
    /// First day, inclusive (YYYY-MM-DD)
    pub start_date: String,
    /// Last day, inclusive (YYYY-MM-DD)
    pub end_date: String,
    /// Employees to provision (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub employees: Vec<u64>,
    /// First cell start (HH:MM)
    #[arg(long, default_value = "08:00")]
    pub day_start: String,
    /// No cell ends after this time (HH:MM)
    #[arg(long, default_value = "18:00")]
    pub day_end: String,
    /// Cell length in minutes
    #[arg(long, default_value_t = 30)]
    pub interval: u32,
}

impl From<GenerateArgs> for GenerateSlots {
    fn from(val: GenerateArgs) -> Self {
        GenerateSlots {
            employee_ids: val.employees,
            start_date: val.start_date,
            end_date: val.end_date,
            day_start: val.day_start,
            day_end: val.day_end,
            interval_minutes: val.interval,
        }
    }
}

/// Show an employee's slot cells on one day
#[derive(ClapArgs)]
pub struct SlotListArgs {
    pub employee_id: u64,
    /// Day (YYYY-MM-DD)
    pub date: String,
}

impl From<SlotListArgs> for ListSlots {
    fn from(val: SlotListArgs) -> Self {
        ListSlots {
            employee_id: val.employee_id,
            date: val.date,
        }
    }
}

#[derive(Subcommand)]
pub enum SlotCommands {
    /// Generate slot cells
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// List slot cells
    #[command(aliases = ["l", "ls"])]
    List(SlotListArgs),
}

// ============================================================================
// Catalog, staff and clients
// ============================================================================

#[derive(ClapArgs)]
pub struct AddServiceArgs {
    pub name: String,
    /// Duration in minutes
    #[arg(long)]
    pub duration: u32,
    /// Recommended price, e.g. 80 or 80.50
    #[arg(long)]
    pub price: Money,
}

impl From<AddServiceArgs> for CreateService {
    fn from(val: AddServiceArgs) -> Self {
        CreateService {
            name: val.name,
            duration_minutes: val.duration,
            recommended_price: val.price.as_decimal(),
        }
    }
}

#[derive(Subcommand)]
pub enum ServiceCommands {
    /// Add a service
    #[command(alias = "a")]
    Add(AddServiceArgs),
    /// List services
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one service
    #[command(alias = "s")]
    Show(IdArgs),
}

#[derive(ClapArgs)]
pub struct AddEmployeeArgs {
    pub name: String,
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<AddEmployeeArgs> for CreateEmployee {
    fn from(val: AddEmployeeArgs) -> Self {
        CreateEmployee {
            name: val.name,
            phone: val.phone,
        }
    }
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// Add an employee
    #[command(alias = "a")]
    Add(AddEmployeeArgs),
    /// List employees
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one employee
    #[command(alias = "s")]
    Show(IdArgs),
}

/// Set the commission an employee earns on a service
#[derive(ClapArgs)]
pub struct SetSpecialtyArgs {
    pub employee_id: u64,
    pub service_id: u64,
    /// Percentage between 0 and 100
    pub rate: f64,
}

impl From<SetSpecialtyArgs> for SetSpecialty {
    fn from(val: SetSpecialtyArgs) -> Self {
        SetSpecialty {
            employee_id: val.employee_id,
            service_id: val.service_id,
            commission_rate: val.rate,
        }
    }
}

#[derive(Subcommand)]
pub enum SpecialtyCommands {
    /// Set or replace a commission rate
    Set(SetSpecialtyArgs),
}

#[derive(ClapArgs)]
pub struct AddClientArgs {
    pub name: String,
    pub phone: String,
}

impl From<AddClientArgs> for CreateClient {
    fn from(val: AddClientArgs) -> Self {
        CreateClient {
            name: val.name,
            phone: val.phone,
        }
    }
}

#[derive(ClapArgs)]
pub struct FindClientArgs {
    pub phone: String,
}

impl From<FindClientArgs> for FindClient {
    fn from(val: FindClientArgs) -> Self {
        FindClient { phone: val.phone }
    }
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Register a client
    #[command(alias = "a")]
    Add(AddClientArgs),
    /// Find a client by phone number
    #[command(alias = "f")]
    Find(FindClientArgs),
    /// Show one client
    #[command(alias = "s")]
    Show(IdArgs),
}
