use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::flow::{normalize_handle, FlowEvent, FlowState, RevealTimer};
use crate::follow::ConfirmSender;
use crate::models::RewardResult;

/// Messages delivered to the UI loop from spawned check tasks and timers.
#[derive(Debug)]
pub enum AppMessage {
    Flow(FlowEvent),
    Board(Vec<RewardResult>),
}

pub struct App {
    pub input: String,
    pub flow: FlowState,
    pub leaderboard: Vec<RewardResult>,
    pub target_handle: String,
    pub profile_url: String,
    pub should_quit: bool,
    /// Present when the configured checker is manual; a pending check waits
    /// on this channel for the user's y/n answer.
    pub confirm: Option<ConfirmSender>,
    pub confirm_pending: bool,
    pub reveal_deadline: Option<Instant>,
    reveal_timer: Option<RevealTimer>,
    message_tx: mpsc::Sender<AppMessage>,
    message_rx: mpsc::Receiver<AppMessage>,
}

impl App {
    pub fn new(
        target_handle: String,
        profile_url: String,
        leaderboard: Vec<RewardResult>,
        confirm: Option<ConfirmSender>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        Self {
            input: String::new(),
            flow: FlowState::Idle,
            leaderboard,
            target_handle,
            profile_url,
            should_quit: false,
            confirm,
            confirm_pending: false,
            reveal_deadline: None,
            reveal_timer: None,
            message_tx,
            message_rx,
        }
    }

    /// Sender handed to spawned check tasks.
    pub fn message_sender(&self) -> mpsc::Sender<AppMessage> {
        self.message_tx.clone()
    }

    /// Applies all messages queued since the last frame.
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.message_rx.try_recv() {
            match message {
                AppMessage::Flow(event) => self.apply(event),
                AppMessage::Board(board) => self.leaderboard = board,
            }
        }
    }

    pub fn apply(&mut self, event: FlowEvent) {
        self.flow = self.flow.clone().apply(event);
        if !self.flow.is_checking() {
            self.confirm_pending = false;
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.flow.is_checking() {
            return;
        }
        self.input.push(c);
        self.apply(FlowEvent::HandleEdited);
    }

    pub fn pop_char(&mut self) {
        if self.flow.is_checking() {
            return;
        }
        self.input.pop();
        self.apply(FlowEvent::HandleEdited);
    }

    /// Starts a check if one can start; returns the handle to check.
    pub fn submit(&mut self) -> Option<String> {
        if self.flow.is_checking() {
            return None;
        }
        let handle = normalize_handle(&self.input);
        if handle.is_empty() {
            return None;
        }
        self.apply(FlowEvent::Submitted {
            handle: handle.clone(),
        });
        // A duplicate handle is rejected before the checker is consulted;
        // arming the prompt for it would leave a stale answer in the channel.
        let duplicate = {
            let needle = handle.to_lowercase();
            self.leaderboard.iter().any(|e| e.handle.to_lowercase() == needle)
        };
        if self.confirm.is_some() && !duplicate {
            self.confirm_pending = true;
        }
        Some(handle)
    }

    /// Answers a pending manual confirmation.
    pub fn answer_confirm(&mut self, following: bool) {
        if !self.confirm_pending {
            return;
        }
        self.confirm_pending = false;
        if let Some(confirm) = &self.confirm {
            // The checker task is waiting on the other end; a full channel
            // means a stale answer and can be dropped.
            let _ = confirm.try_send(following);
        }
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.confirm_pending = false;
        self.apply(FlowEvent::Reset);
    }

    /// Arms the reveal timer when a reveal is on screen and disarms it when
    /// the flow has moved on, so a stale timer can never fire.
    pub fn sync_reveal_timer(&mut self, delay: Duration) {
        match &self.flow {
            FlowState::Revealed { .. } => {
                if self.reveal_timer.is_none() {
                    let tx = self.message_tx.clone();
                    self.reveal_timer = Some(RevealTimer::spawn(delay, move || {
                        let _ = tx.send(AppMessage::Flow(FlowEvent::RevealElapsed));
                    }));
                    self.reveal_deadline = Some(Instant::now() + delay);
                }
            }
            _ => {
                if let Some(timer) = self.reveal_timer.take() {
                    timer.cancel();
                }
                self.reveal_deadline = None;
            }
        }
    }

    /// Seconds left on the reveal countdown, for display.
    pub fn reveal_seconds_left(&self) -> Option<u64> {
        self.reveal_deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()).as_secs())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
