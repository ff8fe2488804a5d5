/// Credentials entered at the login prompt.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub emp_id: String,
    pub password: String,
}
