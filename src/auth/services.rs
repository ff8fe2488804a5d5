use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::dto::LoginRequest;
use crate::auth::password::{is_password_hash, verify_password};
use crate::employees::repo::EmployeeRepo;
use crate::employees::repo_types::Employee;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown id and wrong password are deliberately indistinguishable.
    #[error("invalid ID or password")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Does `secret` match what is stored for this employee?
pub fn credential_matches(employee: &Employee, secret: &str) -> anyhow::Result<bool> {
    if is_password_hash(&employee.password_hash) {
        verify_password(secret, &employee.password_hash)
    } else {
        debug!(emp_id = %employee.emp_id, "comparing legacy plaintext credential");
        Ok(employee.password_hash == secret)
    }
}

/// Returns the employee if `req` names an existing id with a matching secret.
pub fn authenticate(repo: &EmployeeRepo, req: &LoginRequest) -> Result<Employee, AuthError> {
    let Some(employee) = repo.find(&req.emp_id)? else {
        warn!(emp_id = %req.emp_id, "login unknown id");
        return Err(AuthError::InvalidCredentials);
    };

    if !credential_matches(&employee, &req.password)? {
        warn!(emp_id = %req.emp_id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }
    Ok(employee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::state::AppState;

    fn seeded_repo(stored_password: String) -> EmployeeRepo {
        let repo = AppState::fake().repo();
        repo.put(Employee {
            emp_id: "EMP001".into(),
            name: "Asha".into(),
            email: "a@x.com".into(),
            password_hash: stored_password,
            attendance: 90,
            salary: 60000,
            extra: Default::default(),
        })
        .unwrap();
        repo
    }

    fn login(id: &str, pw: &str) -> LoginRequest {
        LoginRequest {
            emp_id: id.into(),
            password: pw.into(),
        }
    }

    #[test]
    fn accepts_matching_hashed_credentials() {
        let repo = seeded_repo(hash_password("Xy12ab34").unwrap());
        let emp = authenticate(&repo, &login("EMP001", "Xy12ab34")).expect("login should work");
        assert_eq!(emp.emp_id, "EMP001");
    }

    #[test]
    fn unknown_id_and_wrong_password_look_the_same() {
        let repo = seeded_repo(hash_password("Xy12ab34").unwrap());
        let unknown = authenticate(&repo, &login("EMP999", "Xy12ab34")).unwrap_err();
        let wrong = authenticate(&repo, &login("EMP001", "xy12ab34")).unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn legacy_plaintext_is_compared_exactly() {
        let repo = seeded_repo("Ab3dE9xZ".into());
        assert!(authenticate(&repo, &login("EMP001", "Ab3dE9xZ")).is_ok());
        assert!(authenticate(&repo, &login("EMP001", "ab3de9xz")).is_err());
    }

    #[test]
    fn credential_check_switches_on_the_stored_form() {
        let mut emp = Employee {
            emp_id: "EMP001".into(),
            name: "Asha".into(),
            email: "a@x.com".into(),
            password_hash: "Ab3dE9xZ".into(),
            attendance: 90,
            salary: 60000,
            extra: Default::default(),
        };
        assert!(credential_matches(&emp, "Ab3dE9xZ").unwrap());
        assert!(!credential_matches(&emp, "Ab3dE9xZ ").unwrap());

        emp.change_password("newpass1").unwrap();
        assert!(credential_matches(&emp, "newpass1").unwrap());
        assert!(!credential_matches(&emp, &emp.password_hash).unwrap());
    }
}
