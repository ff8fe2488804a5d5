use std::io::{BufRead, Write};

use tracing::debug;

use crate::{
    auth::handlers::login_flow, console::Console, employees::handlers::register_flow,
    state::AppState,
};

/// Whether the program loop keeps going after a flow returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Register,
    Login,
    Exit,
}

impl MainChoice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Register),
            "2" => Some(Self::Login),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Top-level Register / Login / Exit loop. Returns on Exit or end of input.
pub fn run<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    loop {
        console.say("\n===== Employee Management System =====")?;
        console.say("1. Register")?;
        console.say("2. Login")?;
        console.say("3. Exit")?;

        let Some(choice) = console.prompt("Enter choice: ")? else {
            debug!("input closed at main menu");
            break;
        };

        let flow = match MainChoice::parse(&choice) {
            Some(MainChoice::Register) => register_flow(state, console)?,
            Some(MainChoice::Login) => login_flow(state, console)?,
            Some(MainChoice::Exit) => Flow::Exit,
            None => {
                console.say("❌ Invalid choice! Please select 1-3.")?;
                Flow::Continue
            }
        };
        if flow == Flow::Exit {
            break;
        }
    }

    console.say("👋 Exiting program...")?;
    Ok(())
}
