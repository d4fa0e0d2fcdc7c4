//! Declarative side effects returned by the navigator.
//!
//! The controller never owns a timer. It tells the host what to schedule or
//! cancel and the host (usually through [`crate::SettleScheduler`]) feeds the
//! result back via `NavigationController::settle`.

use std::fmt;
use std::time::Duration;

use crate::lock::Generation;

/// Request to call `settle(generation)` once `delay` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket {
    pub generation: Generation,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Arm the settle timer for a rebuilt cycle.
    ScheduleSettle(SettleTicket),
    /// A new cycle started; any pending settle timer is stale.
    CancelSettle,
}

impl Effect {
    pub fn schedule(generation: Generation, delay: Duration) -> Self {
        Effect::ScheduleSettle(SettleTicket { generation, delay })
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::ScheduleSettle(ticket) => write!(
                f,
                "ScheduleSettle({}, {}ms)",
                ticket.generation,
                ticket.delay.as_millis()
            ),
            Effect::CancelSettle => f.write_str("CancelSettle"),
        }
    }
}
