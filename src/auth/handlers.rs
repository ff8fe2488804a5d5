use std::io::{BufRead, Write};

use tracing::{info, instrument};

use crate::{
    app::Flow,
    auth::{
        dto::LoginRequest,
        services::{authenticate, AuthError},
    },
    console::Console,
    session::{self, SessionEnd},
    state::AppState,
};

/// Interactive login. On success runs the employee menu and writes the
/// (possibly edited) record back once the session ends.
#[instrument(skip_all)]
pub fn login_flow<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> anyhow::Result<Flow> {
    console.say("\n--- Login ---")?;
    let Some(emp_id) = console.prompt("Enter Employee ID: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(password) = console.prompt("Enter Password: ")? else {
        return Ok(Flow::Exit);
    };

    let repo = state.repo();
    let request = LoginRequest { emp_id, password };
    let employee = match authenticate(&repo, &request) {
        Ok(e) => e,
        Err(AuthError::InvalidCredentials) => {
            console.say("\n❌ Invalid ID or Password!\n")?;
            return Ok(Flow::Continue);
        }
        Err(AuthError::Internal(e)) => return Err(e),
    };

    info!(emp_id = %employee.emp_id, "employee logged in");
    console.say("\n✅ Login Successful!")?;

    let SessionEnd { employee, flow } = session::run(state, console, employee)?;
    // the login key, not the body's emp_id, names the record to replace
    repo.put_at(&request.emp_id, employee)?;
    info!(emp_id = %request.emp_id, "session saved");

    Ok(flow)
}
