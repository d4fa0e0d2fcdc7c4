//! Tokio interpreter for [`Effect`]s.
//!
//! At most one settle timer is pending. When it fires, the message built by
//! `make` is sent back to the host's channel; the host then calls
//! `NavigationController::settle` with the carried generation.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::effects::{Effect, SettleTicket};
use crate::lock::Generation;

pub struct SettleScheduler<M> {
    tx: mpsc::UnboundedSender<M>,
    make: fn(Generation) -> M,
    pending: Option<(Generation, JoinHandle<()>)>,
}

impl<M: Send + 'static> SettleScheduler<M> {
    pub fn new(tx: mpsc::UnboundedSender<M>, make: fn(Generation) -> M) -> Self {
        Self {
            tx,
            make,
            pending: None,
        }
    }

    pub fn apply(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            debug!(%effect, "aside scheduler: applying effect");
            match effect {
                Effect::ScheduleSettle(ticket) => self.schedule(ticket),
                Effect::CancelSettle => self.cancel(),
            }
        }
    }

    /// Arm a timer for `ticket`, replacing any pending one.
    pub fn schedule(&mut self, ticket: SettleTicket) {
        self.cancel();
        let tx = self.tx.clone();
        let message = (self.make)(ticket.generation);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ticket.delay).await;
            if tx.send(message).is_err() {
                warn!(
                    generation = %ticket.generation,
                    "aside scheduler: receiver dropped before settle"
                );
            }
        });
        self.pending = Some((ticket.generation, handle));
    }

    pub fn cancel(&mut self) {
        if let Some((generation, handle)) = self.pending.take() {
            if !handle.is_finished() {
                debug!(%generation, "aside scheduler: settle timer aborted");
            }
            handle.abort();
        }
    }

    /// Generation of the timer still in flight, if any.
    pub fn pending(&self) -> Option<Generation> {
        self.pending
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(generation, _)| *generation)
    }
}

impl<M> Drop for SettleScheduler<M> {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = SettleScheduler::new(tx, |g: Generation| g);
        let generation = Generation::default().next();

        scheduler.apply([Effect::schedule(generation, Duration::from_millis(300))]);
        assert_eq!(scheduler.pending(), Some(generation));

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = SettleScheduler::new(tx, |g: Generation| g);
        let generation = Generation::default().next();

        scheduler.apply([
            Effect::schedule(generation, Duration::from_millis(300)),
            Effect::CancelSettle,
        ]);
        assert_eq!(scheduler.pending(), None);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_previous_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = SettleScheduler::new(tx, |g: Generation| g);
        let first = Generation::default().next();
        let second = first.next();

        scheduler.schedule(SettleTicket {
            generation: first,
            delay: Duration::from_millis(300),
        });
        scheduler.schedule(SettleTicket {
            generation: second,
            delay: Duration::from_millis(300),
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.try_recv().ok(), Some(second));
        assert!(rx.try_recv().is_err());
    }
}
