//! Employee, service, specialty and client operations for the Scheduler.

use super::{today, Scheduler};
use crate::{
    display::{Employees, Services},
    error::{Result, SchedulerError},
    models::{validate_commission_rate, Client, Employee, NewService, Service, Specialty},
    params::{
        non_blank, required_text, CreateClient, CreateEmployee, CreateService, FindClient, Id,
        SetSpecialty,
    },
};

impl Scheduler {
    /// Adds an employee.
    pub async fn add_employee(&self, params: &CreateEmployee) -> Result<Employee> {
        let name = required_text("name", &params.name)?;
        let phone = non_blank(params.phone.as_deref());
        self.with_database(move |db| db.add_employee(&name, phone.as_deref()))
            .await
    }

    /// Retrieves an employee, failing with `EmployeeNotFound` if absent.
    pub async fn get_employee(&self, params: &Id) -> Result<Employee> {
        let id = params.id;
        self.with_database(move |db| db.get_employee(id))
            .await?
            .ok_or(SchedulerError::EmployeeNotFound { id })
    }

    pub async fn list_employees(&self) -> Result<Employees> {
        let employees = self.with_database(|db| db.list_employees()).await?;
        Ok(Employees(employees))
    }

    /// Adds a service to the catalog.
    pub async fn add_service(&self, params: &CreateService) -> Result<Service> {
        let service = NewService::try_from(params.clone())?;
        self.with_database(move |db| db.add_service(&service))
            .await
    }

    /// Retrieves a service, failing with `ServiceNotFound` if absent.
    pub async fn get_service(&self, params: &Id) -> Result<Service> {
        let id = params.id;
        self.with_database(move |db| db.get_service(id))
            .await?
            .ok_or(SchedulerError::ServiceNotFound { id })
    }

    pub async fn list_services(&self) -> Result<Services> {
        let services = self.with_database(|db| db.list_services()).await?;
        Ok(Services(services))
    }

    /// Sets the commission rate an employee earns on a service.
    ///
    /// Only bookings made or re-booked afterwards pick up the new rate.
    pub async fn set_specialty(&self, params: &SetSpecialty) -> Result<Specialty> {
        let employee_id = params.employee_id;
        let service_id = params.service_id;
        let rate = validate_commission_rate(params.commission_rate)?;
        self.with_database(move |db| db.set_specialty(employee_id, service_id, rate))
            .await
    }

    /// Registers a client with zero visits.
    pub async fn create_client(&self, params: &CreateClient) -> Result<Client> {
        let name = required_text("name", &params.name)?;
        let phone = required_text("phone", &params.phone)?;
        let today = today();
        self.with_database(move |db| db.create_client(&name, &phone, today))
            .await
    }

    /// Retrieves a client, failing with `ClientNotFound` if absent.
    pub async fn get_client(&self, params: &Id) -> Result<Client> {
        let id = params.id;
        self.with_database(move |db| db.get_client(id))
            .await?
            .ok_or(SchedulerError::ClientNotFound { id })
    }

    /// Looks a client up by phone number.
    pub async fn find_client(&self, params: &FindClient) -> Result<Option<Client>> {
        let phone = required_text("phone", &params.phone)?;
        self.with_database(move |db| db.find_client_by_phone(&phone))
            .await
    }
}
