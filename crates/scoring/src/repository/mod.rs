pub mod score;
pub mod session;
pub mod status;
pub mod system;

use std::marker::PhantomData;

use serde_json::Value;

use crate::error::Result;
use crate::models::{LockState, ScoreSnapshot, StatusSnapshot};
use crate::sync::Subscription;

pub const SCORES: &str = "scores";
pub const SESSIONS: &str = "sessions";
pub const STATUS: &str = "status";
pub const SYSTEM: &str = "system";

/// Typed view over a raw subtree value. Absent subtrees must parse to an empty value.
pub trait FromSnapshot: Sized {
    fn from_snapshot(value: Option<Value>) -> Self;
}

impl FromSnapshot for ScoreSnapshot {
    fn from_snapshot(value: Option<Value>) -> Self {
        ScoreSnapshot::from_value(value)
    }
}

impl FromSnapshot for StatusSnapshot {
    fn from_snapshot(value: Option<Value>) -> Self {
        StatusSnapshot::from_value(value)
    }
}

impl FromSnapshot for LockState {
    fn from_snapshot(value: Option<Value>) -> Self {
        LockState::from_value(value)
    }
}

/// Live, typed subscription. Dropping it or calling [`Feed::unsubscribe`] releases it.
#[derive(Debug)]
pub struct Feed<T> {
    subscription: Subscription,
    _marker: PhantomData<fn() -> T>,
}

pub type ScoreFeed = Feed<ScoreSnapshot>;
pub type StatusFeed = Feed<StatusSnapshot>;
pub type LockFeed = Feed<LockState>;

impl<T: FromSnapshot> Feed<T> {
    pub(crate) fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            _marker: PhantomData,
        }
    }

    pub fn current(&self) -> T {
        T::from_snapshot(self.subscription.current())
    }

    /// Waits for the next change and returns the refreshed view.
    pub async fn changed(&mut self) -> Result<T> {
        self.subscription.changed().await?;
        Ok(self.current())
    }

    pub fn unsubscribe(self) {
        self.subscription.unsubscribe();
    }
}
