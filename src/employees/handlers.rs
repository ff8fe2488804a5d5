use std::io::{BufRead, Write};

use tracing::instrument;

use crate::{
    app::Flow,
    console::Console,
    employees::{dto::RegisterRequest, services::register},
    state::AppState,
};

/// Interactive registration: asks for name and email, then shows the new id
/// and its temporary password.
#[instrument(skip_all)]
pub fn register_flow<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> anyhow::Result<Flow> {
    console.say("\n--- Register ---")?;
    let Some(name) = console.prompt("Enter name: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(email) = console.prompt("Enter email: ")? else {
        return Ok(Flow::Exit);
    };

    let registration = register(
        &state.repo(),
        RegisterRequest { name, email },
        &mut rand::thread_rng(),
    )?;

    console.say("\n✅ Registration successful!")?;
    console.say(format_args!("   Employee ID: {}", registration.emp_id))?;
    console.say(format_args!(
        "   Temporary Password: {}\n",
        registration.temporary_password
    ))?;
    Ok(Flow::Continue)
}
