use aside::{Generation, PageId};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strum::Display;

use crate::department::Department;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),

    NextDepartment,
    PrevDepartment,
    SwitchDepartment(Department),
    Up,
    Down,
    /// Reload the department board in place.
    Refresh,

    OpenCustomer,
    OpenStaff,
    OpenRosterCustomer,
    OpenSchedule,
    Back,
    Home,

    /// Navigator reported a new current page.
    Navigated(PageId),
    /// Navigator asked host-owned handlers to reset.
    HandlersReset,
    /// Settle timer fired for the given reset cycle.
    Settle(Generation),
}

impl Action {
    /// Global key bindings. Only key presses map to actions.
    pub fn from_key(key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        let action = match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab => Action::NextDepartment,
            KeyCode::BackTab => Action::PrevDepartment,
            KeyCode::Char(c @ '1'..='9') => {
                Action::SwitchDepartment(Department::from_hotkey(c)?)
            }
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Enter => Action::OpenCustomer,
            KeyCode::Char('s') => Action::OpenStaff,
            KeyCode::Char('c') => Action::OpenRosterCustomer,
            KeyCode::Char('a') => Action::OpenSchedule,
            KeyCode::Esc | KeyCode::Backspace => Action::Back,
            KeyCode::Char('h') => Action::Home,
            KeyCode::Char('r') => Action::Refresh,
            _ => return None,
        };
        Some(action)
    }
}
