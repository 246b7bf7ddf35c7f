//! Search over loaded pages and jumps to search results.

use std::io;
use std::sync::Arc;

use crate::in_memory::helpers::{read_states, room, runtime, seed_history, session_with_view, source};
use backscroll::history::{
    adapters::memory::InMemoryLogSource,
    domain::{JumpOutcome, MessageId, RoomId},
};
use backscroll::read_state::adapters::memory::InMemoryReadStateRepository;
use mockable::DefaultClock;
use rstest::rstest;
use tokio::runtime::Runtime;

/// Search only sees what has been loaded; older pages widen the results.
#[rstest]
fn results_grow_as_pages_load(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 40)?;
    let (session, _view) = session_with_view("grace", &room, 20, &source, &read_states)?;
    rt.block_on(session.open());

    let recent = session.search("linus");
    rt.block_on(session.load_more());
    let everything = session.search("linus");

    assert_eq!(recent.len(), 10);
    assert_eq!(everything.len(), 20);
    let newest = everything
        .first()
        .ok_or_else(|| eyre::eyre!("no results"))?;
    assert_eq!(newest.message().id(), &MessageId::new("msg-39"));
    assert_eq!(newest.highlighted_text(), "update 39 from <mark>linus</mark>");
    Ok(())
}

/// Selecting a result far back in the log pages until it is on screen.
#[rstest]
fn jump_to_unloaded_message_pages_back(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 100)?;
    let (session, view) = session_with_view("grace", &room, 20, &source, &read_states)?;
    rt.block_on(session.open());
    session.search("update");
    let target = MessageId::new("msg-5");

    let outcome = rt.block_on(session.jump_to(&target));

    assert_eq!(outcome, JumpOutcome::Found { loads: 4 });
    assert!(view.is_highlighted(&target));
    let offset = view
        .offset_in_viewport(&target)
        .ok_or_else(|| eyre::eyre!("target not rendered"))?;
    assert!((0..600).contains(&offset));
    assert!(session.search_results().is_empty());
    Ok(())
}

/// A jump to an identifier the log never held gives up without an error.
#[rstest]
fn jump_to_unknown_message_gives_up(
    runtime: io::Result<Runtime>,
    room: RoomId,
    source: Arc<InMemoryLogSource>,
    read_states: Arc<InMemoryReadStateRepository<DefaultClock>>,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_history(&source, &room, 30)?;
    let (session, _view) = session_with_view("grace", &room, 10, &source, &read_states)?;
    rt.block_on(session.open());
    session.search("grace");

    let outcome = rt.block_on(session.jump_to(&MessageId::new("deleted-long-ago")));

    assert_eq!(outcome, JumpOutcome::Exhausted { loads: 3 });
    assert_eq!(session.store().len(), 30);
    assert!(!session.search_results().is_empty());
    Ok(())
}
