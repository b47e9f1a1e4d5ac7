//! Undo of recent turns

use crate::error::EaselResult;
use easel_session::{Session, SessionStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a revert request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertOutcome {
    /// The stored session had no turns; nothing was changed
    NothingToRevert,
    /// Turns were removed (possibly zero when asked to revert zero turns)
    Reverted {
        /// Number of turns actually removed
        reverted: u32,
        /// Whether the request exceeded the available turns
        clamped: bool,
        /// Session after the revert
        session: Session,
    },
}

impl RevertOutcome {
    /// Turn count after the revert, if anything was reverted
    pub fn turn_count(&self) -> Option<u32> {
        match self {
            Self::NothingToRevert => None,
            Self::Reverted { session, .. } => Some(session.turn_count),
        }
    }

    /// Latest remaining output path
    pub fn last_output(&self) -> Option<&str> {
        match self {
            Self::NothingToRevert => None,
            Self::Reverted { session, .. } => session.last_output(),
        }
    }
}

/// Removes the most recent turns from a session
pub struct RevertEngine {
    store: Arc<dyn SessionStore>,
}

impl RevertEngine {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Undo the last `turns` turns, clamped to the number available
    pub async fn revert(&self, turns: u32) -> EaselResult<RevertOutcome> {
        let mut session = self.store.load().await;
        let turn_count = session.turn_count;

        if turn_count == 0 {
            info!("No active session to revert.");
            return Ok(RevertOutcome::NothingToRevert);
        }

        if turns == 0 {
            return Ok(RevertOutcome::Reverted {
                reverted: 0,
                clamped: false,
                session,
            });
        }

        let clamped = turns > turn_count;
        let turns = if clamped {
            warn!("Can only revert {} turn(s). Reverting all.", turn_count);
            turn_count
        } else {
            turns
        };

        truncate(&mut session, turns);
        self.store.save(&session).await?;

        if session.turn_count == 0 {
            info!("Reverted {} turn(s). Session is now empty.", turns);
        } else {
            info!(
                "Reverted {} turn(s). Now at turn {}.",
                turns, session.turn_count
            );
        }

        Ok(RevertOutcome::Reverted {
            reverted: turns,
            clamped,
            session,
        })
    }
}

/// Drop the last `turns` user/model pairs and the outputs they produced.
///
/// Only model turns that carried an image consume an entry of `outputs`.
fn truncate(session: &mut Session, turns: u32) {
    let remove = (2 * turns as usize).min(session.history.len());
    let keep = session.history.len() - remove;
    let removed = session.history.split_off(keep);

    let produced = removed.iter().filter(|t| t.has_inline_data()).count();
    let outputs_keep = session.outputs.len().saturating_sub(produced);
    session.outputs.truncate(outputs_keep);

    session.turn_count -= turns;
}
