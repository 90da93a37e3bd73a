#[derive(Clone)]
pub struct DatabaseSettings {
    pub default_path: &'static str,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            default_path: "court_officials.db",
        }
    }
}

#[derive(Clone, Default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// DATABASE_PATH env var wins over the configured default.
    pub fn database_path(&self) -> String {
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| self.database.default_path.to_string())
    }
}
