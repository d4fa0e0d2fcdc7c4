use aside::SettleScheduler;
use color_eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::data::Directory;
use crate::desk::Desk;
use crate::settings::DeskConfig;
use crate::tui::{Event, Tui};
use crate::ui;

/// Owns the terminal and drives the desk: events become actions, actions
/// update the desk, returned effects go to the settle scheduler.
pub struct DeskLoop {
    config: DeskConfig,
    desk: Desk,
    scheduler: SettleScheduler<Action>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl DeskLoop {
    pub fn new(config: DeskConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let desk = Desk::new(
            Directory::sample(),
            config.department,
            &config.aside,
            action_tx.clone(),
        );
        let scheduler = SettleScheduler::new(action_tx.clone(), Action::Settle);
        Self {
            config,
            desk,
            scheduler,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.config.tick_rate)
            .frame_rate(self.config.frame_rate);
        tui.enter()?;
        info!(department = %self.desk.department(), "desk started");

        loop {
            let Some(event) = tui.next_event().await else {
                break;
            };
            self.handle_event(event);

            while let Ok(action) = self.action_rx.try_recv() {
                if !matches!(action, Action::Tick | Action::Render) {
                    debug!("{action:?}");
                }
                let is_render = matches!(action, Action::Render | Action::Resize(..));
                if let Action::Resize(w, h) = action {
                    tui.resize(ratatui::layout::Rect::new(0, 0, w, h))?;
                }
                let effects = self.desk.update(action);
                self.scheduler.apply(effects);

                if is_render {
                    tui.draw(|frame| ui::draw(frame, &self.desk))?;
                    if self.desk.confirm_first_paint() {
                        debug!("first frame painted, aside mounted");
                    }
                }
            }

            if self.desk.should_quit() {
                break;
            }
        }
        tui.exit().await?;
        info!("desk stopped");
        Ok(())
    }

    fn handle_event(&self, event: Event) {
        let action = match event {
            Event::Init => return,
            Event::Tick => Action::Tick,
            Event::Render => Action::Render,
            Event::Resize(w, h) => Action::Resize(w, h),
            Event::Error => Action::Error("terminal input error".into()),
            Event::Key(key) => match Action::from_key(key) {
                Some(action) => action,
                None => return,
            },
        };
        forward(&self.action_tx, action);
    }
}

/// Queue `action` for the next update. A closed channel is logged and
/// reported as `false`.
fn forward(tx: &mpsc::UnboundedSender<Action>, action: Action) -> bool {
    match tx.send(action) {
        Ok(()) => true,
        Err(mpsc::error::SendError(action)) => {
            warn!(?action, "desk: action channel closed, input dropped");
            false
        }
    }
}
