//! Animation sequencer: reveals every light in insertion order, one per tick.
//!
//! The sequencer owns no clock. The host calls [`Sequencer::advance`] with the
//! current time and receives the events that came due; [`Sequencer::next_due`]
//! tells it when to call again.
//!
//! Each `play` issues a fresh [`PlaybackToken`] and stamps it on every step it
//! schedules. `reset` retires the token and drops the queue; `advance` still
//! checks every step against the live token before firing it.

#[cfg(test)]
#[path = "sequencer_test.rs"]
mod sequencer_test;

use crate::consts::{FINAL_HOLD_MS, REVEAL_INTERVAL_MS};
use crate::doc::LightId;

/// Identifies one playback. Steps stamped with a retired token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaybackToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    Reveal(LightId),
    Finish,
}

/// A step waiting for its due time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledStep {
    pub due_ms: u64,
    pub token: PlaybackToken,
    pub kind: StepKind,
}

/// What happened when a live step fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    Revealed(LightId),
    Finished,
}

#[derive(Debug, Default)]
pub struct Sequencer {
    /// Sorted by `due_ms`; equal due times keep scheduling order.
    queue: Vec<ScheduledStep>,
    /// Token of the playback in progress, if any.
    live: Option<PlaybackToken>,
    next_token: u64,
    active: Vec<LightId>,
}

impl Sequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start revealing `ids` in order.
    ///
    /// Returns `None` without doing anything when a playback is already running
    /// or there is nothing to reveal.
    pub fn play(&mut self, ids: Vec<LightId>, now_ms: u64) -> Option<PlaybackToken> {
        if self.is_animating() || ids.is_empty() {
            return None;
        }
        self.next_token += 1;
        let token = PlaybackToken(self.next_token);
        self.live = Some(token);
        self.active.clear();

        let mut due = now_ms;
        for id in ids {
            due += REVEAL_INTERVAL_MS;
            self.schedule(ScheduledStep { due_ms: due, token, kind: StepKind::Reveal(id) });
        }
        self.schedule(ScheduledStep { due_ms: due + FINAL_HOLD_MS, token, kind: StepKind::Finish });
        Some(token)
    }

    fn schedule(&mut self, step: ScheduledStep) {
        let idx = self.queue.partition_point(|s| s.due_ms <= step.due_ms);
        self.queue.insert(idx, step);
    }

    /// Fire every step due at or before `now_ms`, in order.
    ///
    /// Steps from a retired playback are dropped silently.
    pub fn advance(&mut self, now_ms: u64) -> Vec<SequencerEvent> {
        let due = self.queue.partition_point(|s| s.due_ms <= now_ms);
        let mut events = Vec::new();
        for step in self.queue.drain(..due) {
            if self.live != Some(step.token) {
                continue;
            }
            match step.kind {
                StepKind::Reveal(id) => {
                    if !self.active.contains(&id) {
                        self.active.push(id.clone());
                    }
                    events.push(SequencerEvent::Revealed(id));
                }
                StepKind::Finish => {
                    self.live = None;
                    events.push(SequencerEvent::Finished);
                }
            }
        }
        events
    }

    /// Stop immediately: nothing is lit and nothing stays scheduled.
    pub fn reset(&mut self) {
        self.live = None;
        self.active.clear();
        self.queue.clear();
    }

    /// Drop a deleted light from the lit set and from the pending reveals.
    pub fn forget(&mut self, id: &LightId) {
        self.active.retain(|a| a != id);
        self.queue.retain(|s| !matches!(&s.kind, StepKind::Reveal(r) if r == id));
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.live.is_some()
    }

    /// Lights revealed so far, in reveal order.
    #[must_use]
    pub fn active(&self) -> &[LightId] {
        &self.active
    }

    #[must_use]
    pub fn is_active(&self, id: &LightId) -> bool {
        self.active.contains(id)
    }

    /// Due time of the earliest queued step.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.first().map(|s| s.due_ms)
    }

    /// Queued steps, in firing order.
    #[must_use]
    pub fn pending(&self) -> &[ScheduledStep] {
        &self.queue
    }
}
