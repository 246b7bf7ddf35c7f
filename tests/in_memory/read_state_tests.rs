//! Unread counts and read marks shared between sessions on one room.

use std::io;
use std::sync::Arc;

use crate::in_memory::helpers::{read_states, room, runtime, seed_history, session_for, source};
use backscroll::history::{
    adapters::memory::InMemoryLogSource,
    domain::{RoomId, UserId},
};
use backscroll::read_state::{
    adapters::memory::InMemoryReadStateRepository,
    domain::{ReadState, ReadStateKey},
    ports::ReadStateRepository,
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use tokio::runtime::Runtime;

/// Each participant counts only the other's messages.
#[rstest]
fn participants_see_each_others_messages_as_unread(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 9)?;
    let grace = session_for("grace", &room, 20, &source, &read_states)?;
    let linus = session_for("linus", &room, 20, &source, &read_states)?;

    rt.block_on(async {
        grace.open().await;
        linus.open().await;
    });

    assert_eq!(grace.unread_count(), 4);
    assert_eq!(linus.unread_count(), 5);
    Ok(())
}

/// Marking read is per user: one reader does not clear the other's count.
#[rstest]
fn marking_read_is_per_user(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 6)?;
    let grace = session_for("grace", &room, 20, &source, &read_states)?;
    let linus = session_for("linus", &room, 20, &source, &read_states)?;

    let (grace_unread, linus_unread) = rt.block_on(async {
        grace.open().await;
        linus.open().await;
        grace.set_active(true).await;
        (grace.compute_unread().await, linus.compute_unread().await)
    });

    assert_eq!(grace_unread, 0);
    assert_eq!(linus_unread, 3);
    Ok(())
}

/// Marking read merges into the stored record instead of replacing it.
#[rstest]
fn marking_read_keeps_unrelated_fields(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let key = ReadStateKey::new(UserId::new("grace"), room.clone());
    read_states.insert(
        key.clone(),
        ReadState::default().with_field("notifications", json!("mentions")),
    )?;
    let grace = session_for("grace", &room, 20, &source, &read_states)?;
    let before = Utc::now();

    let stored = rt.block_on(async {
        grace.mark_read().await;
        read_states.find(&key).await
    })?;

    let record = stored.ok_or_else(|| eyre::eyre!("record missing"))?;
    assert!(record.last_read().is_some_and(|at| at >= before));
    assert_eq!(record.field("notifications"), Some(&json!("mentions")));
    Ok(())
}
