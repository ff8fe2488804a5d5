/// Input collected by the register flow.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

/// Result of a registration, shown to the user once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub emp_id: String,
    pub temporary_password: String,
}

/// Public view of an employee. The password is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub attendance: u32,
    pub salary: u32,
}

impl ProfileView {
    /// Label/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Employee ID", self.emp_id.clone()),
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
            ("Attendance %", self.attendance.to_string()),
            ("Salary", self.salary.to_string()),
        ]
    }
}
