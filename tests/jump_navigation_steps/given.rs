//! Given steps for jump navigation scenarios.

use std::sync::Arc;

use super::world::{JumpWorld, run_async};
use backscroll::history::{
    adapters::viewport::{ViewportConfig, ViewportRenderer},
    config::HistoryConfig,
    domain::{Message, MessageId, SessionContext, UserId},
    services::ChatSession,
};
use chrono::{Duration, TimeZone, Utc};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given("a room with {count:i64} messages")]
fn room_with_messages(world: &mut JumpWorld, count: i64) -> Result<(), eyre::Report> {
    let start = Utc
        .with_ymd_and_hms(2024, 7, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid start instant"))?;
    for n in 0..count {
        let message = Message::new(
            MessageId::new(format!("msg-{n}")),
            UserId::new("margaret"),
            format!("update {n}"),
            start + Duration::seconds(n),
        );
        world
            .source
            .append(&world.room, message)
            .wrap_err("seed message")?;
    }
    Ok(())
}

#[given("a session paging {batch_size:usize} messages at a time")]
fn session_paging(world: &mut JumpWorld, batch_size: usize) -> Result<(), eyre::Report> {
    let view = Arc::new(ViewportRenderer::new(
        ViewportConfig::default(),
        Arc::new(DefaultClock),
    ));
    let session = ChatSession::new(
        SessionContext::new(UserId::new("ada"), world.room.clone()),
        HistoryConfig::default().with_batch_size(batch_size),
        Arc::clone(&world.source),
        Arc::clone(&world.read_states),
        Arc::clone(&view),
    )
    .wrap_err("create session")?;
    world.session = Some(session);
    world.view = Some(view);
    Ok(())
}

#[given("the session has opened the room")]
fn session_opened(world: &mut JumpWorld) -> Result<(), eyre::Report> {
    let outcome = run_async(world.session()?.open());
    if outcome.batch().is_empty() {
        return Err(eyre::eyre!("opening the room loaded nothing: {outcome:?}"));
    }
    Ok(())
}

#[given("a search for \"{query}\" is active")]
fn search_active(world: &mut JumpWorld, query: String) -> Result<(), eyre::Report> {
    let session = world.session()?;
    session.search(&query);
    if session.search_results().is_empty() {
        return Err(eyre::eyre!("search for {query:?} matched nothing"));
    }
    Ok(())
}
