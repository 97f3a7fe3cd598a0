/// Where the dialogue storage lives unless `QUIZ_DB_PATH` says otherwise.
pub const DEFAULT_DB_PATH: &str = "db.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
}

impl Config {
    /// Reads `.env` (if there is one) and then the process environment.
    /// `TELOXIDE_TOKEN` is picked up by teloxide itself.
    pub fn load() -> Self {
        if let Err(err) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {}", err);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("QUIZ_DB_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        Self { db_path }
    }
}
