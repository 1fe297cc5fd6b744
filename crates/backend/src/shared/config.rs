use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
    /// Directory the config was loaded from; relative paths resolve against it
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// File the config was read from; `None` for the embedded default
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Candidate files that did not exist, in search order
    #[serde(skip)]
    pub searched: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Path to the superstore CSV export
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub dir: String,
    /// Used when RUST_LOG is not set
    pub filter: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[data]
path = "data/Superstore Dataset.csv"

[logging]
dir = "target/logs"
filter = "info"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
///
/// Runs before the subscriber exists, so nothing is logged here; call
/// [`Config::log_origin`] once tracing is up.
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }

    load_from(&candidates, std::env::current_dir()?)
}

/// First `config.toml` found in `dirs`, else the embedded default rooted at `fallback_dir`.
fn load_from(dirs: &[PathBuf], fallback_dir: PathBuf) -> anyhow::Result<Config> {
    let mut searched = Vec::new();
    for dir in dirs {
        let config_path = dir.join("config.toml");
        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config = parse_config(&contents, dir.clone())?;
            config.source = Some(config_path);
            config.searched = searched;
            return Ok(config);
        }
        searched.push(config_path);
    }

    let mut config = parse_config(DEFAULT_CONFIG, fallback_dir)?;
    config.searched = searched;
    Ok(config)
}

fn parse_config(contents: &str, base_dir: PathBuf) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.base_dir = base_dir;
    Ok(config)
}

impl Config {
    /// Report where the config came from and which candidates were missing.
    pub fn log_origin(&self) {
        for path in &self.searched {
            tracing::warn!("config.toml not found at: {}", path.display());
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from: {}", path.display()),
            None => tracing::warn!("Using default embedded configuration"),
        }
    }

    /// CSV path, resolved against the config directory when relative
    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.data.path)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.dir)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG, PathBuf::from("/srv/app")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(
            config.data_path(),
            PathBuf::from("/srv/app/data/Superstore Dataset.csv")
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [data]
            path = "/var/data/superstore.csv"

            [logging]
            dir = "logs"
            filter = "debug"
        "#;
        let config = parse_config(toml, PathBuf::from("/opt")).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/var/data/superstore.csv"));
        assert_eq!(config.log_dir(), PathBuf::from("/opt/logs"));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "superstore-config-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_from_records_source_and_misses() {
        let empty = scratch_dir("empty");
        let with_file = scratch_dir("with-file");
        std::fs::write(
            with_file.join("config.toml"),
            DEFAULT_CONFIG.replace("port = 3000", "port = 4100"),
        )
        .unwrap();

        let config =
            load_from(&[empty.clone(), with_file.clone()], PathBuf::from("/unused")).unwrap();
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.source, Some(with_file.join("config.toml")));
        assert_eq!(config.searched, vec![empty.join("config.toml")]);
        assert_eq!(config.base_dir, with_file);

        std::fs::remove_dir_all(&empty).unwrap();
        std::fs::remove_dir_all(&with_file).unwrap();
    }

    #[test]
    fn test_load_from_falls_back_to_default() {
        let empty = scratch_dir("fallback");

        let config = load_from(&[empty.clone()], PathBuf::from("/srv/app")).unwrap();
        assert_eq!(config.source, None);
        assert_eq!(config.searched, vec![empty.join("config.toml")]);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.base_dir, PathBuf::from("/srv/app"));
        // no subscriber needed to report the origin
        config.log_origin();

        std::fs::remove_dir_all(&empty).unwrap();
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(parse_config("[server]\nhost = \"x\"\nport = 1\n", PathBuf::new()).is_err());
    }
}
