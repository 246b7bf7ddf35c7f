//! In-memory scroll container implementing the `RenderAdapter` port.
//!
//! Models the rows a chat view would lay out (date separators and message
//! bubbles), a scroll offset, and a viewport height. It gives the pagination
//! core something concrete to anchor against and lets tests observe what a
//! real view would do.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use mockable::Clock;
use serde::Deserialize;

use crate::history::{
    domain::{Message, MessageId},
    ports::{RenderAdapter, RenderMode},
};

/// Layout parameters for [`ViewportRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Visible height of the scroll container, in pixels.
    pub viewport_height: u32,
    /// Height of a text message row.
    pub message_height: u32,
    /// Extra height of a row carrying an image.
    pub image_height: u32,
    /// Height of a date separator row.
    pub separator_height: u32,
    /// Distance from the bottom within which appends keep the view pinned.
    pub follow_slack_px: u32,
    /// How long a highlighted message stays highlighted, in milliseconds.
    pub highlight_duration_ms: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            viewport_height: 600,
            message_height: 48,
            image_height: 200,
            separator_height: 32,
            follow_slack_px: 100,
            highlight_duration_ms: 3000,
        }
    }
}

/// What a laid-out row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Calendar day heading.
    DateSeparator(NaiveDate),
    /// A message bubble.
    Message(MessageId),
}

/// A laid-out row of the scroll container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Row content.
    pub kind: RowKind,
    /// Row height in pixels.
    pub height: u32,
}

#[derive(Debug, Default)]
struct ViewportState {
    rows: Vec<Row>,
    scroll_top: u32,
    highlighted_until: HashMap<MessageId, DateTime<Utc>>,
}

impl ViewportState {
    fn content_height(&self) -> u32 {
        self.rows.iter().map(|row| row.height).sum()
    }

    fn top_of(&self, id: &MessageId) -> Option<(u32, u32)> {
        let mut top = 0_u32;
        for row in &self.rows {
            if matches!(&row.kind, RowKind::Message(row_id) if row_id == id) {
                return Some((top, row.height));
            }
            top = top.saturating_add(row.height);
        }
        None
    }
}

/// Scroll container that keeps its anchor across prepends.
///
/// Prepending grows the scroll offset by the height of the inserted rows, so
/// whatever was on screen stays exactly where it was. Appends follow the
/// bottom only when the view was already near it. A date separator opens
/// every rendered batch and every change of calendar day inside it.
pub struct ViewportRenderer<C>
where
    C: Clock + Send + Sync,
{
    config: ViewportConfig,
    clock: Arc<C>,
    state: Mutex<ViewportState>,
}

impl<C> ViewportRenderer<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty viewport.
    #[must_use]
    pub fn new(config: ViewportConfig, clock: Arc<C>) -> Self {
        Self {
            config,
            clock,
            state: Mutex::new(ViewportState::default()),
        }
    }

    /// Moves the scroll offset, as a user scrolling would.
    ///
    /// The offset is clamped to the scrollable range.
    pub fn scroll_to(&self, scroll_top: u32) {
        let mut state = self.lock();
        let max = self.max_scroll(&state);
        state.scroll_top = scroll_top.min(max);
    }

    /// Returns the current scroll offset.
    #[must_use]
    pub fn scroll_top(&self) -> u32 {
        self.lock().scroll_top
    }

    /// Returns the total height of the laid-out rows.
    #[must_use]
    pub fn content_height(&self) -> u32 {
        self.lock().content_height()
    }

    /// Returns the offset of a message row from the top of the viewport.
    ///
    /// Negative values are above the visible area.
    #[must_use]
    pub fn offset_in_viewport(&self, id: &MessageId) -> Option<i64> {
        let state = self.lock();
        let (top, _) = state.top_of(id)?;
        Some(i64::from(top) - i64::from(state.scroll_top))
    }

    /// Returns the first message row that is at least partly visible.
    #[must_use]
    pub fn topmost_visible(&self) -> Option<MessageId> {
        let state = self.lock();
        let mut top = 0_u32;
        for row in &state.rows {
            let bottom = top.saturating_add(row.height);
            if let RowKind::Message(id) = &row.kind {
                if bottom > state.scroll_top {
                    return Some(id.clone());
                }
            }
            top = bottom;
        }
        None
    }

    /// Returns the rendered message identifiers, top to bottom.
    #[must_use]
    pub fn rendered_ids(&self) -> Vec<MessageId> {
        self.lock()
            .rows
            .iter()
            .filter_map(|row| match &row.kind {
                RowKind::Message(id) => Some(id.clone()),
                RowKind::DateSeparator(_) => None,
            })
            .collect()
    }

    /// Returns a copy of every laid-out row, top to bottom.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.lock().rows.clone()
    }

    /// Returns `true` while the message's highlight has not expired.
    #[must_use]
    pub fn is_highlighted(&self, id: &MessageId) -> bool {
        let now = self.clock.utc();
        self.lock()
            .highlighted_until
            .get(id)
            .is_some_and(|until| now < *until)
    }

    fn lock(&self) -> MutexGuard<'_, ViewportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn max_scroll(&self, state: &ViewportState) -> u32 {
        state
            .content_height()
            .saturating_sub(self.config.viewport_height)
    }

    fn layout(&self, messages: &[Message]) -> Vec<Row> {
        let mut rows = Vec::with_capacity(messages.len().saturating_add(1));
        let mut current_day = None;
        for message in messages {
            let day = message.timestamp().date_naive();
            if current_day != Some(day) {
                rows.push(Row {
                    kind: RowKind::DateSeparator(day),
                    height: self.config.separator_height,
                });
                current_day = Some(day);
            }
            let extra = if message.image_url().is_some() {
                self.config.image_height
            } else {
                0
            };
            rows.push(Row {
                kind: RowKind::Message(message.id().clone()),
                height: self.config.message_height.saturating_add(extra),
            });
        }
        rows
    }
}

impl<C> RenderAdapter for ViewportRenderer<C>
where
    C: Clock + Send + Sync,
{
    fn render_batch(&self, messages: &[Message], mode: RenderMode) {
        if messages.is_empty() {
            return;
        }
        let mut rows = self.layout(messages);
        let added: u32 = rows.iter().map(|row| row.height).sum();
        let mut state = self.lock();
        match mode {
            RenderMode::Prepend => {
                rows.append(&mut state.rows);
                state.rows = rows;
                let max = self.max_scroll(&state);
                state.scroll_top = state.scroll_top.saturating_add(added).min(max);
            }
            RenderMode::Append => {
                let distance_from_bottom = state
                    .content_height()
                    .saturating_sub(state.scroll_top)
                    .saturating_sub(self.config.viewport_height);
                let follow = distance_from_bottom < self.config.follow_slack_px;
                state.rows.extend(rows);
                if follow {
                    state.scroll_top = self.max_scroll(&state);
                }
            }
        }
    }

    #[expect(
        clippy::integer_division,
        reason = "Centring rounds down to whole pixels"
    )]
    fn scroll_to_message(&self, id: &MessageId) {
        let mut state = self.lock();
        let Some((top, height)) = state.top_of(id) else {
            return;
        };
        let centre = top.saturating_add(height / 2);
        let target = centre.saturating_sub(self.config.viewport_height / 2);
        state.scroll_top = target.min(self.max_scroll(&state));
    }

    fn highlight_message(&self, id: &MessageId) {
        let until = self.clock.utc()
            + Duration::milliseconds(i64::from(self.config.highlight_duration_ms));
        self.lock().highlighted_until.insert(id.clone(), until);
    }
}
