//! Read access to employee master data and direct HR profile edits.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::employee_router;
pub use service::{EmployeeService, EmployeeServiceError, EmployeeSummary};
