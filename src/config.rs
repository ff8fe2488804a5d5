use std::path::PathBuf;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub employees_file: PathBuf,
    pub currency_symbol: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let employees_file = lookup("EMPLOYEES_FILE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "employees.json".into());
        let currency_symbol = lookup("CURRENCY_SYMBOL").unwrap_or_else(|| "₹".into());
        Ok(Self {
            employees_file: PathBuf::from(employees_file),
            currency_symbol,
        })
    }
}
