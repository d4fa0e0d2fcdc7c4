//! Content carried by aside pages.
//!
//! Payloads are owned snapshots so a page keeps rendering the data it was
//! opened with, even while the directory behind it changes.

use chrono::{DateTime, Local};

use crate::data::{Appointment, Customer, Directory, Staff};
use crate::department::Department;

/// Stable page ids. One slot per category.
pub mod ids {
    pub const CUSTOMER: &str = "customer";
    pub const STAFF: &str = "staff";
    pub const SCHEDULE: &str = "schedule";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub department: Department,
    pub queue: Vec<Customer>,
    pub schedule: Vec<Appointment>,
    pub notices: Vec<String>,
    pub refreshed_at: DateTime<Local>,
}

impl Board {
    pub fn build(directory: &Directory, department: Department) -> Self {
        Self {
            department,
            queue: directory.queue(department).into_iter().cloned().collect(),
            schedule: directory.schedule(department).into_iter().cloned().collect(),
            notices: directory
                .notices(department)
                .into_iter()
                .map(|n| n.text.clone())
                .collect(),
            refreshed_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerCard {
    pub customer: Customer,
    pub staff: Option<Staff>,
    pub next_appointment: Option<Appointment>,
}

impl CustomerCard {
    pub fn build(directory: &Directory, customer: &Customer) -> Self {
        Self {
            customer: customer.clone(),
            staff: directory.staff(customer.staff).cloned(),
            next_appointment: directory.next_appointment(customer.chart_no).cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffCard {
    pub staff: Staff,
    pub roster: Vec<Customer>,
}

impl StaffCard {
    pub fn build(directory: &Directory, staff: &Staff) -> Self {
        Self {
            staff: staff.clone(),
            roster: directory.roster(staff.id).into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleCard {
    pub appointment: Appointment,
    pub customer: Option<Customer>,
    pub staff: Option<Staff>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeskPayload {
    Board(Board),
    Customer(CustomerCard),
    Staff(StaffCard),
    Schedule(ScheduleCard),
}

impl DeskPayload {
    /// Panel title shown in the wrapper frame and breadcrumb.
    pub fn title(&self) -> String {
        match self {
            DeskPayload::Board(board) => board.department.title().to_string(),
            DeskPayload::Customer(card) => {
                format!("{} #{}", card.customer.name, card.customer.chart_no)
            }
            DeskPayload::Staff(card) => format!("{} ({})", card.staff.name, card.staff.role),
            DeskPayload::Schedule(card) => format!("{} schedule", card.appointment.time),
        }
    }
}
