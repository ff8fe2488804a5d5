use std::sync::Arc;

use crate::employees::repo_types::{Employee, Roster};
use crate::storage::RecordStore;

/// Scoped access to the roster. Every call reloads from the store, so the
/// in-memory copy never outlives one operation.
#[derive(Clone)]
pub struct EmployeeRepo {
    store: Arc<dyn RecordStore>,
}

impl EmployeeRepo {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Loads the roster and runs `f` against it. Nothing is written.
    pub fn read<T>(&self, f: impl FnOnce(&Roster) -> T) -> anyhow::Result<T> {
        let roster = self.store.load()?;
        Ok(f(&roster))
    }

    /// Loads the roster, lets `f` mutate it, then saves the whole roster.
    /// If `f` fails nothing is saved.
    pub fn write<T>(&self, f: impl FnOnce(&mut Roster) -> anyhow::Result<T>) -> anyhow::Result<T> {
        let mut roster = self.store.load()?;
        let out = f(&mut roster)?;
        self.store.save(&roster)?;
        Ok(out)
    }

    /// Fails only if the record under `emp_id` exists but can't be read.
    pub fn find(&self, emp_id: &str) -> anyhow::Result<Option<Employee>> {
        self.read(|roster| roster.employee(emp_id))?
            .map_err(Into::into)
    }

    pub fn put(&self, employee: Employee) -> anyhow::Result<()> {
        self.write(|roster| {
            roster.upsert(employee);
            Ok(())
        })
    }

    /// Writes one record back under `key`, leaving every other record as
    /// currently stored.
    pub fn put_at(&self, key: &str, employee: Employee) -> anyhow::Result<()> {
        self.write(|roster| {
            roster.put_at(key, employee);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn employee(id: &str) -> Employee {
        Employee {
            emp_id: id.into(),
            name: "Asha".into(),
            email: "a@x.com".into(),
            password_hash: "pw".into(),
            attendance: 70,
            salary: 35000,
            extra: Default::default(),
        }
    }

    #[test]
    fn put_then_find() {
        let repo = AppState::fake().repo();
        repo.put(employee("EMP001")).unwrap();
        assert_eq!(repo.find("EMP001").unwrap(), Some(employee("EMP001")));
        assert_eq!(repo.find("EMP404").unwrap(), None);
    }

    #[test]
    fn failed_write_saves_nothing() {
        let repo = AppState::fake().repo();
        let res: anyhow::Result<()> = repo.write(|roster| {
            roster.upsert(employee("EMP001"));
            anyhow::bail!("boom")
        });
        assert!(res.is_err());
        assert_eq!(repo.read(|r| r.count()).unwrap(), 0);
    }

    #[test]
    fn put_keeps_records_added_since_load() {
        let state = AppState::fake();
        let repo = state.repo();
        repo.put(employee("EMP001")).unwrap();

        let mut session_copy = repo.find("EMP001").unwrap().unwrap();
        // someone else registers while the session is open
        repo.put(employee("EMP002")).unwrap();

        session_copy.name = "Rita".into();
        repo.put(session_copy).unwrap();

        let (len, name) = repo
            .read(|r| (r.count(), r.employee("EMP001").unwrap().unwrap().name))
            .unwrap();
        assert_eq!(len, 2);
        assert_eq!(name, "Rita");
    }

    #[test]
    fn put_at_leaves_the_record_named_in_the_body_alone() {
        let repo = AppState::fake().repo();
        let mut other = employee("EMP002");
        other.name = "B".into();
        repo.put(other.clone()).unwrap();

        let mut mislabelled = employee("EMP002");
        mislabelled.name = "Zed".into();
        repo.put_at("EMP001", mislabelled).unwrap();

        assert_eq!(repo.find("EMP002").unwrap(), Some(other));
        assert_eq!(repo.find("EMP001").unwrap().unwrap().name, "Zed");
    }
}
