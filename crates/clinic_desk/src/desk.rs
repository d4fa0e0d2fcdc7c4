//! Desk state and its action reducer.
//!
//! `Desk::update` is synchronous and terminal-free. Navigator hooks report
//! back through the action channel, so their effects (status bar, toolbar
//! selection) land on the next update like any other action.

use aside::{
    AsideSettings, Effect, NavOutcome, NavigationController, NavigatorHooks, Page, PageId,
    PageKind, ResetPhase,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::data::{Customer, Directory};
use crate::department::Department;
use crate::payload::{ids, Board, CustomerCard, DeskPayload, ScheduleCard, StaffCard};

pub type DeskNavigator = NavigationController<DeskPayload, Department>;

pub struct Desk {
    directory: Directory,
    department: Department,
    nav: DeskNavigator,
    /// Toolbar selection: highlighted queue row.
    selected: Option<usize>,
    roster_cursor: usize,
    viewing: Option<PageId>,
    status: Option<String>,
    pending_main: bool,
    should_quit: bool,
}

impl Desk {
    pub fn new(
        directory: Directory,
        department: Department,
        aside: &AsideSettings,
        action_tx: UnboundedSender<Action>,
    ) -> Self {
        let navigate_tx = action_tx.clone();
        let hooks = NavigatorHooks::new()
            .on_navigate(move |id| {
                if navigate_tx.send(Action::Navigated(id.clone())).is_err() {
                    warn!(%id, "desk: action channel closed");
                }
            })
            .on_handlers_reset(move || {
                if action_tx.send(Action::HandlersReset).is_err() {
                    warn!("desk: action channel closed");
                }
            });

        let mut nav = DeskNavigator::from_settings(aside, hooks);
        nav.observe_route(&department);
        nav.supply_main(DeskPayload::Board(Board::build(&directory, department)));

        Self {
            directory,
            department,
            nav,
            selected: None,
            roster_cursor: 0,
            viewing: None,
            status: None,
            pending_main: false,
            should_quit: false,
        }
    }

    pub fn department(&self) -> Department {
        self.department
    }

    pub fn navigator(&self) -> &DeskNavigator {
        &self.nav
    }

    pub fn queue(&self) -> Vec<&Customer> {
        self.directory.queue(self.department)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn roster_cursor(&self) -> usize {
        self.roster_cursor
    }

    pub fn viewing(&self) -> Option<&PageId> {
        self.viewing.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn confirm_first_paint(&mut self) -> bool {
        self.nav.confirm_first_paint()
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::Render => self.nav.observe_route(&self.department),
            Action::Tick => self.supply_pending_main(),
            Action::Resize(..) => Vec::new(),
            Action::Error(message) => {
                self.status = Some(message);
                Vec::new()
            }

            Action::NextDepartment => self.switch_department(self.department.next()),
            Action::PrevDepartment => self.switch_department(self.department.prev()),
            Action::SwitchDepartment(department) => self.switch_department(department),
            Action::Up => {
                self.move_cursor(-1);
                Vec::new()
            }
            Action::Down => {
                self.move_cursor(1);
                Vec::new()
            }
            Action::Refresh => {
                self.pending_main = false;
                let board = Board::build(&self.directory, self.department);
                self.nav.supply_main(DeskPayload::Board(board))
            }

            Action::OpenCustomer => {
                self.open_selected_customer();
                Vec::new()
            }
            Action::OpenStaff => {
                self.open_staff();
                Vec::new()
            }
            Action::OpenRosterCustomer => {
                self.open_roster_customer();
                Vec::new()
            }
            Action::OpenSchedule => {
                self.open_schedule();
                Vec::new()
            }
            Action::Back => {
                let outcome = self.nav.go_back();
                self.report(outcome);
                Vec::new()
            }
            Action::Home => {
                self.nav.reset_to_main();
                Vec::new()
            }

            Action::Navigated(id) => {
                if id == ids::STAFF {
                    self.roster_cursor = 0;
                }
                self.viewing = Some(id);
                Vec::new()
            }
            Action::HandlersReset => {
                debug!("desk: clearing toolbar selection");
                self.selected = None;
                self.roster_cursor = 0;
                Vec::new()
            }
            Action::Settle(generation) => {
                if !self.nav.settle(generation) {
                    debug!(%generation, "desk: stale settle ignored");
                }
                Vec::new()
            }
        }
    }

    fn switch_department(&mut self, department: Department) -> Vec<Effect> {
        if department != self.department {
            info!(from = %self.department, to = %department, "desk: switching department");
            self.department = department;
            self.status = None;
        }
        Vec::new()
    }

    /// Second half of a route change: once the navigator has cleared, hand it
    /// the new board one tick later.
    fn supply_pending_main(&mut self) -> Vec<Effect> {
        if self.pending_main {
            self.pending_main = false;
            let board = Board::build(&self.directory, self.department);
            return self.nav.supply_main(DeskPayload::Board(board));
        }
        if self.nav.phase() == ResetPhase::Resetting {
            self.pending_main = true;
        }
        Vec::new()
    }

    fn current_payload(&self) -> Option<&DeskPayload> {
        self.nav.stack().current().map(|page: &Page<DeskPayload>| &page.payload)
    }

    fn move_cursor(&mut self, delta: isize) {
        if let Some(DeskPayload::Staff(card)) = self.current_payload() {
            let last = card.roster.len().saturating_sub(1);
            self.roster_cursor = step(self.roster_cursor, delta, last);
            return;
        }
        let last = self.queue().len().saturating_sub(1);
        self.selected = Some(match self.selected {
            Some(row) => step(row, delta, last),
            None => 0,
        });
    }

    fn selected_customer(&self) -> Option<Customer> {
        let row = self.selected?;
        self.queue().get(row).map(|c| (*c).clone())
    }

    fn open_customer(&mut self, customer: &Customer) {
        let card = CustomerCard::build(&self.directory, customer);
        let outcome = self
            .nav
            .open(ids::CUSTOMER, DeskPayload::Customer(card), PageKind::Wrapped);
        self.report(outcome);
    }

    fn open_selected_customer(&mut self) {
        match self.selected_customer() {
            Some(customer) => self.open_customer(&customer),
            None => self.status = Some("Select a customer first".into()),
        }
    }

    fn open_staff(&mut self) {
        let staff_id = match self.current_payload() {
            Some(DeskPayload::Customer(card)) => Some(card.customer.staff),
            _ => self.selected_customer().map(|c| c.staff),
        };
        let Some(staff) = staff_id.and_then(|id| self.directory.staff(id)).cloned() else {
            self.status = Some("No staff to show".into());
            return;
        };
        let card = StaffCard::build(&self.directory, &staff);
        let outcome = self
            .nav
            .open(ids::STAFF, DeskPayload::Staff(card), PageKind::Wrapped);
        self.report(outcome);
    }

    fn open_roster_customer(&mut self) {
        let customer = match self.current_payload() {
            Some(DeskPayload::Staff(card)) => card.roster.get(self.roster_cursor).cloned(),
            _ => None,
        };
        match customer {
            Some(customer) => self.open_customer(&customer),
            None => self.status = Some("Open a staff page to pick from the roster".into()),
        }
    }

    fn open_schedule(&mut self) {
        let chart_no = match self.current_payload() {
            Some(DeskPayload::Customer(card)) => Some(card.customer.chart_no),
            _ => self.selected_customer().map(|c| c.chart_no),
        };
        let Some(appointment) = chart_no
            .and_then(|no| self.directory.next_appointment(no))
            .cloned()
        else {
            self.status = Some("No appointment scheduled".into());
            return;
        };
        let card = ScheduleCard {
            customer: self.directory.customer(appointment.chart_no).cloned(),
            staff: self.directory.staff(appointment.staff).cloned(),
            appointment,
        };
        let outcome = self
            .nav
            .open(ids::SCHEDULE, DeskPayload::Schedule(card), PageKind::Wrapped);
        self.report(outcome);
    }

    fn report(&mut self, outcome: NavOutcome) {
        self.status = match outcome {
            NavOutcome::Applied { .. } => None,
            NavOutcome::Ignored(reason) => Some(format!("Navigation ignored: {reason}")),
        };
    }
}

fn step(value: usize, delta: isize, last: usize) -> usize {
    value.saturating_add_signed(delta).min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clamps_both_ends() {
        assert_eq!(step(0, -1, 3), 0);
        assert_eq!(step(3, 1, 3), 3);
        assert_eq!(step(1, 1, 3), 2);
    }
}
