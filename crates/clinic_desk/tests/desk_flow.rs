//! Desk behaviour without a terminal: actions in, navigator state out.

use std::time::Duration;

use aside::{
    AsideSettings, AsideView, Effect, Generation, ResetPhase, SettleTicket, ViewSource,
};
use clinic_desk::action::Action;
use clinic_desk::data::Directory;
use clinic_desk::department::Department;
use clinic_desk::desk::Desk;
use clinic_desk::payload::DeskPayload;
use clinic_desk::ui;
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

struct Harness {
    desk: Desk,
    rx: UnboundedReceiver<Action>,
    effects: Vec<Effect>,
}

impl Harness {
    fn new(department: Department) -> Self {
        Self::with_settings(department, &AsideSettings::default())
    }

    fn with_settings(department: Department, aside: &AsideSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let desk = Desk::new(Directory::sample(), department, aside, tx);
        let mut harness = Self {
            desk,
            rx,
            effects: Vec::new(),
        };
        harness.pump();
        harness
    }

    fn send(&mut self, action: Action) {
        let effects = self.desk.update(action);
        self.effects.extend(effects);
        self.pump();
    }

    /// Feed hook-generated actions back in, like the event loop does.
    fn pump(&mut self) {
        while let Ok(action) = self.rx.try_recv() {
            let effects = self.desk.update(action);
            self.effects.extend(effects);
        }
    }

    fn ids(&self) -> Vec<String> {
        self.desk
            .navigator()
            .stack()
            .entries()
            .iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    fn viewing(&self) -> Option<String> {
        self.desk.viewing().map(ToString::to_string)
    }

    fn tickets(&self) -> Vec<SettleTicket> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::ScheduleSettle(ticket) => Some(*ticket),
                Effect::CancelSettle => None,
            })
            .collect()
    }

    fn scheduled(&self) -> Vec<Generation> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::ScheduleSettle(ticket) => Some(ticket.generation),
                Effect::CancelSettle => None,
            })
            .collect()
    }

    /// Switch department and run the deferred rebuild to completion.
    fn switch_and_rebuild(&mut self, department: Department) -> Generation {
        self.send(Action::SwitchDepartment(department));
        self.send(Action::Render);
        self.send(Action::Tick);
        self.send(Action::Tick);
        *self.scheduled().last().expect("settle scheduled")
    }
}

fn screen(desk: &Desk) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, desk)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn starts_on_main_board() {
    let h = Harness::new(Department::Clinic);
    assert_eq!(h.ids(), vec!["main"]);
    assert_eq!(h.viewing().as_deref(), Some("main"));
    let Some(DeskPayload::Board(board)) = h.desk.navigator().stack().current().map(|p| &p.payload)
    else {
        panic!("main page must carry the department board");
    };
    assert_eq!(board.department, Department::Clinic);
}

#[test]
fn open_requires_selection() {
    let mut h = Harness::new(Department::Reception);
    h.send(Action::OpenCustomer);
    assert_eq!(h.ids(), vec!["main"]);
    assert_eq!(h.desk.status(), Some("Select a customer first"));

    h.send(Action::Down);
    h.send(Action::OpenCustomer);
    assert_eq!(h.ids(), vec!["main", "customer"]);
    assert_eq!(h.viewing().as_deref(), Some("customer"));
    assert_eq!(h.desk.status(), None);
}

#[test]
fn roster_customer_reuses_customer_slot() {
    let mut h = Harness::new(Department::Reception);
    h.send(Action::Down);
    h.send(Action::OpenCustomer);
    h.send(Action::OpenStaff);
    assert_eq!(h.ids(), vec!["main", "customer", "staff"]);

    h.send(Action::Down);
    assert_eq!(h.desk.roster_cursor(), 1);
    h.send(Action::OpenRosterCustomer);

    assert_eq!(h.ids(), vec!["main", "customer", "staff"]);
    assert_eq!(h.desk.navigator().stack().current_index(), 1);
    assert_eq!(h.viewing().as_deref(), Some("customer"));
    match &h.desk.navigator().stack().entries()[1].payload {
        DeskPayload::Customer(card) => assert_eq!(card.customer.name, "Lee Junho"),
        other => panic!("expected customer card, got {other:?}"),
    }
}

#[test]
fn back_and_home() {
    let mut h = Harness::new(Department::Clinic);
    h.send(Action::Down);
    h.send(Action::OpenCustomer);
    h.send(Action::OpenSchedule);
    assert_eq!(h.ids(), vec!["main", "customer", "schedule"]);

    h.send(Action::Back);
    assert_eq!(h.viewing().as_deref(), Some("customer"));

    h.send(Action::OpenStaff);
    h.send(Action::Home);
    assert_eq!(h.ids(), vec!["main"]);
    assert_eq!(h.viewing().as_deref(), Some("main"));

    h.send(Action::Back);
    assert_eq!(h.desk.status(), Some("Navigation ignored: at_root"));
}

#[test]
fn department_switch_resets_aside_and_selection() {
    let mut h = Harness::new(Department::Reception);
    h.desk.confirm_first_paint();
    h.send(Action::Down);
    h.send(Action::OpenCustomer);

    h.send(Action::SwitchDepartment(Department::Billing));
    h.send(Action::Render);
    assert_eq!(h.desk.navigator().phase(), ResetPhase::Resetting);
    assert_eq!(h.desk.selected(), None);
    assert!(h.ids().is_empty());
    match h.desk.navigator().view() {
        AsideView::Panels { source, panels, .. } => {
            assert_eq!(source, ViewSource::Held);
            assert_eq!(panels.len(), 2);
        }
        AsideView::Shell => panic!("previous stack must stay visible"),
    }

    h.send(Action::Down);
    h.send(Action::OpenCustomer);
    assert_eq!(h.desk.status(), Some("Navigation ignored: locked"));

    h.send(Action::Tick);
    assert!(h.ids().is_empty(), "main is supplied one tick later");
    h.send(Action::Tick);
    assert_eq!(h.ids(), vec!["main"]);
    assert_eq!(h.viewing().as_deref(), Some("main"));
    assert!(h.desk.navigator().is_locked());

    let generation = *h.scheduled().last().expect("settle scheduled");
    h.send(Action::Settle(generation));
    assert!(!h.desk.navigator().is_locked());

    h.send(Action::OpenCustomer);
    assert_eq!(h.ids(), vec!["main", "customer"]);
}

#[test]
fn superseded_settle_is_ignored() {
    let mut h = Harness::new(Department::Reception);
    let stale = h.switch_and_rebuild(Department::Clinic);

    h.send(Action::SwitchDepartment(Department::Treatment));
    h.send(Action::Render);
    assert_eq!(h.effects.last(), Some(&Effect::CancelSettle));

    h.send(Action::Settle(stale));
    assert!(h.desk.navigator().is_locked());

    h.send(Action::Tick);
    h.send(Action::Tick);
    let live = *h.scheduled().last().expect("settle scheduled");
    assert!(live > stale);
    h.send(Action::Settle(live));
    assert!(!h.desk.navigator().is_locked());
}

#[test]
fn configured_settle_delay_reaches_tickets() {
    let aside = AsideSettings {
        settle_delay_ms: 75,
    };
    let mut h = Harness::with_settings(Department::Reception, &aside);
    let generation = h.switch_and_rebuild(Department::Billing);

    let ticket = *h.tickets().last().expect("settle scheduled");
    assert_eq!(ticket.generation, generation);
    assert_eq!(ticket.delay, Duration::from_millis(75));
}

#[test]
fn refresh_keeps_open_pages() {
    let mut h = Harness::new(Department::Counseling);
    h.send(Action::Down);
    h.send(Action::OpenCustomer);
    h.send(Action::Refresh);
    assert_eq!(h.ids(), vec!["main", "customer"]);
    assert_eq!(h.viewing().as_deref(), Some("customer"));
    assert!(h.scheduled().is_empty());
}

#[test]
fn first_frame_is_an_empty_shell() {
    let mut h = Harness::new(Department::Treatment);
    let before = screen(&h.desk);
    assert!(before.contains("Aside"));
    assert!(!before.contains("Notices"));

    assert!(h.desk.confirm_first_paint());
    let after = screen(&h.desk);
    assert!(after.contains("Notices"));
    assert!(after.contains("viewing: main"));
    h.send(Action::Quit);
    assert!(h.desk.should_quit());
}

#[test]
fn wrapped_page_shows_title_and_breadcrumb() {
    let mut h = Harness::new(Department::Reception);
    h.desk.confirm_first_paint();
    h.send(Action::Down);
    h.send(Action::OpenCustomer);

    let text = screen(&h.desk);
    assert!(text.contains("Kim Dahye #1001"));
    assert!(text.contains("main › customer"));
    assert!(text.contains("viewing: customer"));
}
