//! Fail-soft outcomes of page loads and jumps.

use super::Message;

/// Result of a page-load request.
///
/// Loads never return errors to the caller. Transport failures are logged
/// and surface as [`LoadOutcome::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived; holds the messages newly merged into the window,
    /// oldest first.
    Loaded(Vec<Message>),
    /// The log has no older messages. Latched for the session.
    Exhausted,
    /// Another load was already in flight; nothing was requested.
    Busy,
    /// The remote request failed; nothing changed.
    Failed,
}

impl LoadOutcome {
    /// Returns the merged batch, empty for every outcome but `Loaded`.
    #[must_use]
    pub fn batch(&self) -> &[Message] {
        match self {
            Self::Loaded(batch) => batch,
            Self::Exhausted | Self::Busy | Self::Failed => &[],
        }
    }

    /// Consumes the outcome, returning the merged batch.
    #[must_use]
    pub fn into_batch(self) -> Vec<Message> {
        match self {
            Self::Loaded(batch) => batch,
            Self::Exhausted | Self::Busy | Self::Failed => Vec::new(),
        }
    }

    /// Returns `true` for [`LoadOutcome::Exhausted`].
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Terminal state of a jump to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The message is loaded; it was scrolled to and highlighted.
    Found {
        /// Number of page requests it took, zero when already loaded.
        loads: usize,
    },
    /// The log ran out of older messages before the target appeared.
    Exhausted {
        /// Number of page requests issued.
        loads: usize,
    },
    /// The attempt bound was reached without finding the target.
    AttemptsExceeded {
        /// Number of page requests issued. Attempts refused as busy are
        /// not counted.
        loads: usize,
    },
}

impl JumpOutcome {
    /// Returns `true` when the target was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Returns how many page requests the jump issued.
    #[must_use]
    pub const fn loads(&self) -> usize {
        match *self {
            Self::Found { loads } | Self::Exhausted { loads } | Self::AttemptsExceeded { loads } => {
                loads
            }
        }
    }
}
