//! Live appends delivered through the room's change feed.

use std::sync::Arc;
use std::time::Duration;

use crate::in_memory::helpers::{history_start, read_states, room, seed_history, session_for, source};
use backscroll::history::{
    adapters::memory::InMemoryLogSource,
    domain::{MessageId, RoomId, UserId},
};
use backscroll::read_state::adapters::memory::InMemoryReadStateRepository;
use mockable::DefaultClock;
use rstest::rstest;

async fn wait_until(mut condition: impl FnMut() -> bool) -> eyre::Result<()> {
    for _ in 0..200 {
        if condition() {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    Err(eyre::eyre!("condition not met in time"))
}

#[rstest]
#[tokio::test]
async fn posted_messages_reach_an_open_session(
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    seed_history(&source, &room, 5)?;
    let session = Arc::new(session_for("grace", &room, 20, &source, &read_states)?);
    session.open().await;
    let _feed = session.spawn_live_feed()?;

    source.post(
        &room,
        UserId::new("linus"),
        "just landed",
        history_start() + chrono::Duration::hours(2),
    )?;

    wait_until(|| session.store().len() == 6).await?;
    let newest = session
        .store()
        .snapshot()
        .last()
        .map(|m| m.text().to_owned());
    assert_eq!(newest.as_deref(), Some("just landed"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn edits_on_the_feed_are_ignored(
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let seeded = seed_history(&source, &room, 3)?;
    let session = Arc::new(session_for("grace", &room, 20, &source, &read_states)?);
    session.open().await;
    let _feed = session.spawn_live_feed()?;
    let original = seeded
        .last()
        .cloned()
        .ok_or_else(|| eyre::eyre!("nothing seeded"))?;

    source.modify(
        &room,
        backscroll::history::domain::Message::new(
            original.id().clone(),
            original.sender_id().clone(),
            "rewritten",
            original.timestamp(),
        ),
    )?;
    source.post(&room, UserId::new("linus"), "marker", history_start() + chrono::Duration::hours(1))?;

    wait_until(|| session.store().len() == 4).await?;
    let kept = session.store().lookup(&MessageId::new("msg-2"));
    assert_eq!(kept.map(|m| m.text().to_owned()), Some("update 2 from grace".to_owned()));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn cancelled_feed_stops_delivering(
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let session = Arc::new(session_for("grace", &room, 20, &source, &read_states)?);
    session.open().await;
    let feed = session.spawn_live_feed()?;

    feed.cancel();
    wait_until(|| feed.is_finished()).await?;
    source.post(&room, UserId::new("linus"), "too late", history_start())?;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(session.store().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn active_session_marks_live_messages_read(
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    seed_history(&source, &room, 4)?;
    let session = Arc::new(session_for("grace", &room, 20, &source, &read_states)?);
    session.open().await;
    assert_eq!(session.unread_count(), 2);
    session.set_active(true).await;
    let _feed = session.spawn_live_feed()?;

    source.post(&room, UserId::new("linus"), "ping", chrono::Utc::now())?;
    wait_until(|| session.store().len() == 5).await?;

    let mut unread = usize::MAX;
    for _ in 0..200 {
        unread = session.compute_unread().await;
        if unread == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(unread, 0);
    Ok(())
}
