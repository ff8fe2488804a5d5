use lazy_static::lazy_static;
use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::Regex;
use tracing::info;

use crate::auth::password::hash_password;
use crate::employees::dto::{RegisterRequest, Registration};
use crate::employees::repo::EmployeeRepo;
use crate::employees::repo_types::{Employee, Roster};

pub const TEMP_PASSWORD_LEN: usize = 8;
pub const ATTENDANCE_RANGE: std::ops::RangeInclusive<u32> = 60..=100;
pub const SALARY_RANGE: std::ops::RangeInclusive<u32> = 30_000..=70_000;

lazy_static! {
    static ref EMP_ID_RE: Regex = Regex::new(r"^EMP(\d+)$").unwrap();
}

/// Next id sequence. Never lower than anything already handed out, so ids
/// stay unique even if records disappear from the file.
pub fn next_seq(roster: &Roster) -> u32 {
    let highest_suffix = roster
        .employees
        .keys()
        .filter_map(|id| EMP_ID_RE.captures(id))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let count = u32::try_from(roster.count()).unwrap_or(u32::MAX);
    roster
        .last_seq
        .max(highest_suffix)
        .max(count)
        .saturating_add(1)
}

pub fn format_id(seq: u32) -> String {
    format!("EMP{seq:03}")
}

/// Sequence and rendered id for the next registration.
pub fn next_id(roster: &Roster) -> (u32, String) {
    let seq = next_seq(roster);
    (seq, format_id(seq))
}

/// `length` characters drawn uniformly from A-Z, a-z, 0-9.
pub fn random_password<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

pub fn random_attendance<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(ATTENDANCE_RANGE)
}

pub fn random_salary<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(SALARY_RANGE)
}

/// Creates a new employee with generated id, temporary password,
/// attendance and salary, and persists it.
pub fn register<R: Rng + ?Sized>(
    repo: &EmployeeRepo,
    req: RegisterRequest,
    rng: &mut R,
) -> anyhow::Result<Registration> {
    let registration = repo.write(|roster| {
        let (seq, emp_id) = next_id(roster);
        let temporary_password = random_password(rng, TEMP_PASSWORD_LEN);

        let employee = Employee {
            emp_id: emp_id.clone(),
            name: req.name,
            email: req.email,
            password_hash: hash_password(&temporary_password)?,
            attendance: random_attendance(rng),
            salary: random_salary(rng),
            extra: Default::default(),
        };
        roster.upsert(employee);
        roster.last_seq = seq;

        Ok(Registration {
            emp_id,
            temporary_password,
        })
    })?;

    info!(emp_id = %registration.emp_id, "employee registered");
    Ok(registration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn bare(id: &str) -> Employee {
        Employee {
            emp_id: id.into(),
            name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            attendance: 60,
            salary: 30000,
            extra: Default::default(),
        }
    }

    fn request(name: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: format!("{name}@example.com"),
        }
    }

    #[test]
    fn first_id_is_emp001() {
        assert_eq!(next_id(&Roster::default()), (1, "EMP001".to_string()));
    }

    #[test]
    fn ids_pad_to_three_digits_and_grow_past_them() {
        assert_eq!(format_id(7), "EMP007");
        assert_eq!(format_id(42), "EMP042");
        assert_eq!(format_id(1000), "EMP1000");
    }

    #[test]
    fn next_id_never_reuses_a_removed_id() {
        let mut roster = Roster::default();
        roster.upsert(bare("EMP001"));
        roster.upsert(bare("EMP003"));
        roster.last_seq = 3;
        assert_eq!(next_id(&roster).1, "EMP004");

        // counter lost: highest existing suffix still wins over the count
        roster.last_seq = 0;
        assert_eq!(next_id(&roster).1, "EMP004");
    }

    #[test]
    fn next_id_counts_foreign_keys() {
        let mut roster = Roster::default();
        roster.upsert(bare("manual-entry"));
        roster.upsert(bare("another"));
        assert_eq!(next_id(&roster).1, "EMP003");
    }

    #[test]
    fn passwords_are_eight_alphanumerics() {
        let mut rng = rng();
        for _ in 0..500 {
            let pw = random_password(&mut rng, TEMP_PASSWORD_LEN);
            assert_eq!(pw.len(), 8);
            assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()), "{pw}");
        }
    }

    #[test]
    fn generated_numbers_stay_in_range() {
        let mut rng = rng();
        for _ in 0..2000 {
            let a = random_attendance(&mut rng);
            let s = random_salary(&mut rng);
            assert!((60..=100).contains(&a), "{a}");
            assert!((30000..=70000).contains(&s), "{s}");
        }
    }

    #[test]
    fn sequential_registrations_have_no_gaps() {
        let repo = AppState::fake().repo();
        let mut rng = rng();
        let ids: Vec<String> = (0..4)
            .map(|i| register(&repo, request(&format!("e{i}")), &mut rng).unwrap().emp_id)
            .collect();
        assert_eq!(ids, vec!["EMP001", "EMP002", "EMP003", "EMP004"]);
        assert_eq!(repo.read(|r| r.last_seq).unwrap(), 4);
    }

    #[test]
    fn register_stores_hash_not_temporary_password() {
        let repo = AppState::fake().repo();
        let reg = register(&repo, request("asha"), &mut rng()).unwrap();
        let stored = repo.find(&reg.emp_id).unwrap().unwrap();
        assert_ne!(stored.password_hash, reg.temporary_password);
        assert!(crate::auth::password::verify_password(&reg.temporary_password, &stored.password_hash).unwrap());
        assert_eq!(stored.name, "asha");
        assert_eq!(stored.email, "asha@example.com");
    }
}
