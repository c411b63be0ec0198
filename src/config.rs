use std::path::PathBuf;

/// Runtime settings read from the environment, with defaults for local use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub identity_file: String,
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            identity_file: "identity.json".to_string(),
            seed_demo: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        fn bool_env(name: &str, default: bool) -> bool {
            std::env::var(name)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        }
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("LOBBY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            identity_file: std::env::var("LOBBY_IDENTITY_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.identity_file),
            seed_demo: bool_env("LOBBY_SEED_DEMO", defaults.seed_demo),
        }
    }

    pub fn identity_path(&self) -> PathBuf {
        self.data_dir.join(&self.identity_file)
    }
}
