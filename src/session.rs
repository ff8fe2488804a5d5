use std::io::{BufRead, Write};

use tracing::{debug, instrument};

use crate::{app::Flow, console::Console, employees::repo_types::Employee, state::AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ViewProfile,
    EditProfile,
    ViewAttendance,
    ViewSalary,
    ChangePassword,
    Logout,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::ViewProfile),
            "2" => Some(Self::EditProfile),
            "3" => Some(Self::ViewAttendance),
            "4" => Some(Self::ViewSalary),
            "5" => Some(Self::ChangePassword),
            "6" => Some(Self::Logout),
            _ => None,
        }
    }
}

const MENU: [&str; 6] = [
    "1. View Profile",
    "2. Edit Profile",
    "3. View Attendance",
    "4. View Salary",
    "5. Change Password",
    "6. Logout",
];

/// How a session ended, and the record to write back.
#[derive(Debug)]
pub struct SessionEnd {
    pub employee: Employee,
    pub flow: Flow,
}

/// Runs the employee menu until logout or end of input. Edits only touch
/// the in-memory `employee`; the caller persists it afterwards.
#[instrument(skip_all, fields(emp_id = %employee.emp_id))]
pub fn run<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    mut employee: Employee,
) -> anyhow::Result<SessionEnd> {
    loop {
        console.say("\n--- Employee Menu ---")?;
        for item in MENU {
            console.say(item)?;
        }

        let Some(choice) = console.prompt("Enter choice: ")? else {
            debug!("input closed inside session");
            return Ok(SessionEnd {
                employee,
                flow: Flow::Exit,
            });
        };

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::ViewProfile) => {
                for (label, value) in employee.view_profile().entries() {
                    console.say(format_args!("{label}: {value}"))?;
                }
            }
            Some(MenuChoice::EditProfile) => {
                let Some(name) = console.prompt("Enter new name: ")? else {
                    return Ok(SessionEnd {
                        employee,
                        flow: Flow::Exit,
                    });
                };
                let Some(email) = console.prompt("Enter new email: ")? else {
                    return Ok(SessionEnd {
                        employee,
                        flow: Flow::Exit,
                    });
                };
                employee.edit_profile(&name, &email);
                console.say("✅ Profile updated!")?;
            }
            Some(MenuChoice::ViewAttendance) => {
                console.say(format_args!("Attendance: {}%", employee.attendance))?;
            }
            Some(MenuChoice::ViewSalary) => {
                console.say(format_args!(
                    "Salary: {}{}",
                    state.config.currency_symbol, employee.salary
                ))?;
            }
            Some(MenuChoice::ChangePassword) => {
                let Some(new_password) = console.prompt("Enter new password: ")? else {
                    return Ok(SessionEnd {
                        employee,
                        flow: Flow::Exit,
                    });
                };
                employee.change_password(&new_password)?;
                console.say("✅ Password changed!")?;
            }
            Some(MenuChoice::Logout) => {
                console.say("🔒 Logged out.")?;
                return Ok(SessionEnd {
                    employee,
                    flow: Flow::Continue,
                });
            }
            None => console.say("❌ Invalid choice! Please select 1-6.")?,
        }
    }
}
