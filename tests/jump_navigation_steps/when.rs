//! When steps for jump navigation scenarios.

use super::world::{JumpWorld, run_async};
use backscroll::history::domain::MessageId;
use rstest_bdd_macros::when;

#[when("the reader jumps to message \"{id}\"")]
fn jump_to_message(world: &mut JumpWorld, id: String) -> Result<(), eyre::Report> {
    let outcome = run_async(world.session()?.jump_to(&MessageId::new(id)));
    world.outcome = Some(outcome);
    Ok(())
}
