//! Backward pagination through a session over [`InMemoryLogSource`].
//!
//! [`InMemoryLogSource`]: backscroll::history::adapters::memory::InMemoryLogSource

use std::io;
use std::sync::Arc;

use crate::in_memory::helpers::{
    ids, read_states, room, runtime, seed_history, session_for, session_with_view, source,
};
use backscroll::history::{adapters::memory::InMemoryLogSource, domain::{LoadOutcome, RoomId}};
use backscroll::read_state::adapters::memory::InMemoryReadStateRepository;
use mockable::DefaultClock;
use rstest::rstest;
use tokio::runtime::Runtime;

/// Scrolling back through the whole log yields every message exactly once,
/// oldest first.
#[rstest]
fn scrolling_to_the_start_loads_the_whole_log(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let seeded = seed_history(&source, &room, 53)?;
    let session = session_for("grace", &room, 20, &source, &read_states)?;

    rt.block_on(async {
        session.open().await;
        while session.on_scroll(0).await.is_some() {}
    });

    assert!(session.loader().is_exhausted());
    assert_eq!(ids(&session.store().snapshot()), ids(&seeded));
    // Three pages of data and one empty page.
    assert_eq!(source.request_count(), 4);
    Ok(())
}

/// A log shorter than one page is exhausted on the first `load_more`.
#[rstest]
fn short_log_exhausts_after_one_page(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 7)?;
    let session = session_for("grace", &room, 20, &source, &read_states)?;

    let (first, second, third) = rt.block_on(async {
        (
            session.open().await,
            session.load_more().await,
            session.load_more().await,
        )
    });

    assert_eq!(first.batch().len(), 7);
    assert_eq!(second, LoadOutcome::Exhausted);
    assert_eq!(third, LoadOutcome::Exhausted);
    assert_eq!(source.request_count(), 2);
    Ok(())
}

/// The message at the top of the screen stays put while older pages land
/// above it.
#[rstest]
fn older_pages_do_not_move_the_view(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 60)?;
    let (session, view) = session_with_view("grace", &room, 20, &source, &read_states)?;
    rt.block_on(session.open());

    view.scroll_to(20);
    let anchor = view
        .topmost_visible()
        .ok_or_else(|| eyre::eyre!("nothing visible"))?;
    let offset = view.offset_in_viewport(&anchor);

    let outcome = rt.block_on(session.on_scroll(view.scroll_top()));

    assert!(matches!(outcome, Some(LoadOutcome::Loaded(_))));
    assert_eq!(view.topmost_visible(), Some(anchor.clone()));
    assert_eq!(view.offset_in_viewport(&anchor), offset);
    assert_eq!(view.rendered_ids().len(), 40);
    Ok(())
}

/// Failed page requests leave the session able to retry on the next scroll.
#[rstest]
fn failed_page_can_be_retried(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 30)?;
    let session = session_for("grace", &room, 10, &source, &read_states)?;
    rt.block_on(session.open());
    source.fail_next(1);

    let failed = rt.block_on(session.on_scroll(0));
    let retried = rt.block_on(session.on_scroll(0));

    assert_eq!(failed, Some(LoadOutcome::Failed));
    assert!(retried.is_some_and(|outcome| outcome.batch().len() == 10));
    assert_eq!(session.store().len(), 20);
    Ok(())
}
