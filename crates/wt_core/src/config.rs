use std::env;

pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Environment-style application settings. CLI flags override these.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub max_recursion_depth: u32,
    pub db_path: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            max_recursion_depth: env::var("MAX_RECURSION_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_DEPTH),
            db_path: env::var("WIKITREE_DB_PATH").ok(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            max_recursion_depth: DEFAULT_MAX_DEPTH,
            db_path: None,
        }
    }
}
