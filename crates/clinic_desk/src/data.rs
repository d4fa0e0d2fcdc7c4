//! Static sample records backing the dashboard.

use strum::Display;

use crate::department::Department;

pub type ChartNo = u32;
pub type StaffId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum VisitStatus {
    Waiting,
    #[strum(to_string = "In session")]
    InSession,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub chart_no: ChartNo,
    pub name: String,
    pub purpose: String,
    pub status: VisitStatus,
    pub department: Department,
    pub staff: StaffId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: String,
    pub department: Department,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub time: String,
    pub chart_no: ChartNo,
    pub staff: StaffId,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub department: Department,
    pub text: String,
}

/// In-memory directory of everything the desk can show.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    customers: Vec<Customer>,
    staff: Vec<Staff>,
    appointments: Vec<Appointment>,
    notices: Vec<Notice>,
}

impl Directory {
    pub fn sample() -> Self {
        use Department::*;
        use VisitStatus::*;

        let staff = vec![
            staff(1, "Yuna Seo", "Coordinator", Reception),
            staff(2, "Minho Park", "Consultant", Counseling),
            staff(3, "Dr. Jiwon Han", "Dermatologist", Clinic),
            staff(4, "Dr. Sora Lim", "Physician", Clinic),
            staff(5, "Hana Choi", "Therapist", Treatment),
            staff(6, "Taeyang Kang", "Therapist", Treatment),
            staff(7, "Eunji Yoon", "Billing clerk", Billing),
        ];

        let customers = vec![
            customer(1001, "Kim Dahye", "First visit", Waiting, Reception, 1),
            customer(1002, "Lee Junho", "Follow-up check", Waiting, Reception, 1),
            customer(1003, "Park Sein", "Laser package consult", InSession, Counseling, 2),
            customer(1004, "Choi Mirae", "Skin booster consult", Waiting, Counseling, 2),
            customer(1005, "Jung Woojin", "Acne diagnosis", InSession, Clinic, 3),
            customer(1006, "Han Areum", "Pigmentation review", Waiting, Clinic, 4),
            customer(1007, "Oh Seojun", "Post-op check", Waiting, Clinic, 3),
            customer(1008, "Shin Yerin", "Laser toning 3/10", InSession, Treatment, 5),
            customer(1009, "Bae Hyunwoo", "Lifting session", Waiting, Treatment, 6),
            customer(1010, "Kang Nari", "Package payment", Waiting, Billing, 7),
            customer(1011, "Yoo Jisoo", "Refund request", Done, Billing, 7),
        ];

        let appointments = vec![
            appointment("09:30", 1001, 1, "Registration and intake form"),
            appointment("10:00", 1003, 2, "Package options A/B"),
            appointment("10:30", 1005, 3, "Prescription review"),
            appointment("11:00", 1006, 4, "Compare with March photos"),
            appointment("11:30", 1008, 5, "Session 3 of 10"),
            appointment("13:00", 1009, 6, "Bring consent form"),
            appointment("14:00", 1010, 7, "Card split payment"),
            appointment("15:00", 1002, 1, "Results pickup"),
            appointment("15:30", 1007, 3, "Suture removal"),
        ];

        let notices = vec![
            notice(Reception, "Parking validation printer is down, issue paper tickets."),
            notice(Counseling, "Spring package pricing applies from today."),
            notice(Clinic, "Room 3 laser under maintenance until 14:00."),
            notice(Treatment, "Restock numbing cream before the afternoon block."),
            notice(Billing, "Card terminal 2 requires a restart after each refund."),
            notice(Clinic, "Dr. Lim leaves at 16:00."),
        ];

        Self {
            customers,
            staff,
            appointments,
            notices,
        }
    }

    pub fn customer(&self, chart_no: ChartNo) -> Option<&Customer> {
        self.customers.iter().find(|c| c.chart_no == chart_no)
    }

    pub fn staff(&self, id: StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    /// Customers currently waiting on or seen by `department`.
    pub fn queue(&self, department: Department) -> Vec<&Customer> {
        self.customers
            .iter()
            .filter(|c| c.department == department)
            .collect()
    }

    /// Customers assigned to staff member `id`.
    pub fn roster(&self, id: StaffId) -> Vec<&Customer> {
        self.customers.iter().filter(|c| c.staff == id).collect()
    }

    pub fn schedule(&self, department: Department) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| {
                self.customer(a.chart_no)
                    .is_some_and(|c| c.department == department)
            })
            .collect()
    }

    pub fn next_appointment(&self, chart_no: ChartNo) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.chart_no == chart_no)
    }

    pub fn notices(&self, department: Department) -> Vec<&Notice> {
        self.notices
            .iter()
            .filter(|n| n.department == department)
            .collect()
    }
}

fn customer(
    chart_no: ChartNo,
    name: &str,
    purpose: &str,
    status: VisitStatus,
    department: Department,
    staff: StaffId,
) -> Customer {
    Customer {
        chart_no,
        name: name.into(),
        purpose: purpose.into(),
        status,
        department,
        staff,
    }
}

fn staff(id: StaffId, name: &str, role: &str, department: Department) -> Staff {
    Staff {
        id,
        name: name.into(),
        role: role.into(),
        department,
    }
}

fn appointment(time: &str, chart_no: ChartNo, staff: StaffId, note: &str) -> Appointment {
    Appointment {
        time: time.into(),
        chart_no,
        staff,
        note: note.into(),
    }
}

fn notice(department: Department, text: &str) -> Notice {
    Notice {
        department,
        text: text.into(),
    }
}
