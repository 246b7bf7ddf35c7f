//! Then steps for jump navigation scenarios.

use super::world::JumpWorld;
use backscroll::history::domain::{JumpOutcome, MessageId};
use rstest_bdd_macros::then;

fn expect_outcome(world: &JumpWorld, expected: JumpOutcome) -> Result<(), eyre::Report> {
    let outcome = world.outcome()?;
    if outcome != expected {
        return Err(eyre::eyre!("expected {expected:?}, got {outcome:?}"));
    }
    Ok(())
}

#[then("the jump finds the message after {loads:usize} page loads")]
fn jump_found(world: &JumpWorld, loads: usize) -> Result<(), eyre::Report> {
    expect_outcome(world, JumpOutcome::Found { loads })
}

#[then("the jump reports the history exhausted after {loads:usize} page loads")]
fn jump_exhausted(world: &JumpWorld, loads: usize) -> Result<(), eyre::Report> {
    expect_outcome(world, JumpOutcome::Exhausted { loads })
}

#[then("the jump gives up after {loads:usize} page loads")]
fn jump_gave_up(world: &JumpWorld, loads: usize) -> Result<(), eyre::Report> {
    expect_outcome(world, JumpOutcome::AttemptsExceeded { loads })
}

#[then("the message \"{id}\" is highlighted")]
fn message_highlighted(world: &JumpWorld, id: String) -> Result<(), eyre::Report> {
    let target = MessageId::new(id);
    if !world.view()?.is_highlighted(&target) {
        return Err(eyre::eyre!("{target} is not highlighted"));
    }
    Ok(())
}

#[then("no search is active")]
fn no_search_active(world: &JumpWorld) -> Result<(), eyre::Report> {
    if !world.session()?.search_results().is_empty() {
        return Err(eyre::eyre!("search results are still shown"));
    }
    Ok(())
}

#[then("the search is still active")]
fn search_still_active(world: &JumpWorld) -> Result<(), eyre::Report> {
    if world.session()?.search_results().is_empty() {
        return Err(eyre::eyre!("search was cleared"));
    }
    Ok(())
}

#[then("{count:usize} page requests reached the log")]
fn page_requests(world: &JumpWorld, count: usize) -> Result<(), eyre::Report> {
    let issued = world.source.request_count();
    if issued != count {
        return Err(eyre::eyre!("expected {count} page requests, got {issued}"));
    }
    Ok(())
}
