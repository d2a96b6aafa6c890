//! Caller identity and self-service scoping.
//!
//! Authorization happens before the scheduler is invoked. The scheduler only
//! uses the caller's role to narrow schedule queries for employees.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Role of the caller issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Owner,
    Manager,
    Employee,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::Employee => "employee",
        };
        f.write_str(name)
    }
}

/// Identity attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Caller {
    /// Employee ID when `role` is [`Role::Employee`]
    pub user_id: Option<u64>,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: Option<u64>, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Employee filter to apply to a schedule query.
    ///
    /// Employees only ever see their own schedule; owners and managers get
    /// whatever they asked for.
    pub fn scope_employee(&self, requested: Option<u64>) -> Option<u64> {
        match (self.role, self.user_id) {
            (Role::Employee, Some(own)) => Some(own),
            _ => requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_is_scoped_to_self() {
        let caller = Caller::new(Some(4), Role::Employee);
        assert_eq!(caller.scope_employee(None), Some(4));
        assert_eq!(caller.scope_employee(Some(9)), Some(4));
    }

    #[test]
    fn test_managers_are_unrestricted() {
        let manager = Caller::new(Some(1), Role::Manager);
        assert_eq!(manager.scope_employee(Some(9)), Some(9));
        assert_eq!(manager.scope_employee(None), None);
        assert_eq!(Caller::default().scope_employee(Some(2)), Some(2));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Manager".parse::<Role>(), Ok(Role::Manager));
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::Employee.to_string(), "employee");
    }
}
