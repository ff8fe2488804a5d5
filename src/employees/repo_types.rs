use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::auth::password::hash_password;
use crate::employees::dto::ProfileView;

/// Employee record as stored in the backing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub emp_id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String, // Argon2 PHC string (or legacy plaintext)
    pub attendance: u32,       // percentage, 60..=100
    pub salary: u32,           // 30000..=70000
    #[serde(flatten)]
    pub extra: Map<String, Value>, // fields this program doesn't know, kept as-is
}

impl Employee {
    pub fn view_profile(&self) -> ProfileView {
        ProfileView {
            emp_id: self.emp_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            attendance: self.attendance,
            salary: self.salary,
        }
    }

    /// Overwrites name and email. Empty values are accepted.
    pub fn edit_profile(&mut self, new_name: &str, new_email: &str) {
        self.name = new_name.to_string();
        self.email = new_email.to_string();
    }

    /// Replaces the stored credential with a hash of `new_password`.
    pub fn change_password(&mut self, new_password: &str) -> anyhow::Result<()> {
        self.password_hash = hash_password(new_password)?;
        Ok(())
    }
}

/// One entry of the stored document. Records that don't fit `Employee` are
/// kept verbatim so they survive saves made by unrelated operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Employee(Employee),
    Unreadable(Value),
}

#[derive(Debug, Error)]
#[error("record {key} has the wrong shape: {source}")]
pub struct MalformedRecord {
    pub key: String,
    #[source]
    pub source: serde_json::Error,
}

/// Everything the record store holds: records keyed by id, plus the
/// highest id sequence ever handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub employees: BTreeMap<String, StoredRecord>,
    pub last_seq: u32,
}

impl Roster {
    pub fn count(&self) -> usize {
        self.employees.len()
    }

    /// The employee stored under `key`. A record of the wrong shape only
    /// fails here, when something actually needs it.
    pub fn employee(&self, key: &str) -> Result<Option<Employee>, MalformedRecord> {
        match self.employees.get(key) {
            None => Ok(None),
            Some(StoredRecord::Employee(employee)) => Ok(Some(employee.clone())),
            Some(StoredRecord::Unreadable(raw)) => match serde_json::from_value(raw.clone()) {
                Ok(employee) => Ok(Some(employee)),
                Err(source) => Err(MalformedRecord {
                    key: key.to_string(),
                    source,
                }),
            },
        }
    }

    /// Inserts or replaces the record under `key`, whatever its `emp_id` says.
    pub fn put_at(&mut self, key: &str, employee: Employee) {
        self.employees
            .insert(key.to_string(), StoredRecord::Employee(employee));
    }

    /// Inserts or replaces the record under its own id.
    pub fn upsert(&mut self, employee: Employee) {
        let key = employee.emp_id.clone();
        self.put_at(&key, employee);
    }
}
