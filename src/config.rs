use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use daycycle_core::CycleRules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the update endpoint URL.
pub const UPDATE_API_ENV: &str = "DAYCYCLE_UPDATE_API";

/// Environment variable holding the update endpoint's API key.
pub const API_KEY_ENV: &str = "API_KEY";

const DEFAULT_CALENDAR_URL: &str = "https://phs.parklandsd.org/about/calendar";
const DEFAULT_TIMEZONE: &str = "America/New_York";
const DEFAULT_TIMEOUT: &str = "10s";

/// Contents of ~/.config/daycycle/config.toml. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Calendar page to scrape
    pub calendar_url: String,

    /// Timezone that decides what "today" is
    pub timezone: String,

    /// Timeout for each HTTP request (e.g. "10s", "1m")
    pub timeout: String,

    /// Rotation length, seeding and markers
    pub cycle: CycleRules,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout: DEFAULT_TIMEOUT.to_string(),
            cycle: CycleRules::default(),
        }
    }
}

/// Where to send results. Both values come from the environment.
#[derive(Clone)]
pub struct PublishConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Effective configuration for one run, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub calendar_url: String,
    pub timezone: Tz,
    pub timeout: Duration,
    pub rules: CycleRules,
    /// `None` only when publishing was not required at load time.
    pub publish: Option<PublishConfig>,
}

impl Config {
    /// Load the config file (if present) and the publish secrets from the environment.
    ///
    /// With `require_publish`, a missing endpoint or API key is an error.
    pub fn load(path: Option<&Path>, require_publish: bool) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };
        let file = load_file_config(&path)?;
        Self::from_parts(path, file, env_var, require_publish)
    }

    /// Build a config from already-loaded parts; `env` looks up environment variables.
    pub fn from_parts(
        path: PathBuf,
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        require_publish: bool,
    ) -> Result<Self> {
        let timezone: Tz = file
            .timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", file.timezone, e))?;

        let timeout = humantime::parse_duration(&file.timeout)
            .with_context(|| format!("Invalid timeout '{}'", file.timeout))?;

        file.cycle
            .validate()
            .context("Invalid [cycle] configuration")?;

        let publish = match (env(UPDATE_API_ENV), env(API_KEY_ENV)) {
            (Some(endpoint), Some(api_key)) => Some(PublishConfig { endpoint, api_key }),
            (endpoint, _) if require_publish => {
                let missing = if endpoint.is_none() {
                    UPDATE_API_ENV
                } else {
                    API_KEY_ENV
                };
                anyhow::bail!(
                    "{} not set in environment variables\n\n\
                    Both {} and {} are required to publish results.\n\
                    Use --dry-run to resolve without publishing.",
                    missing,
                    UPDATE_API_ENV,
                    API_KEY_ENV
                );
            }
            _ => None,
        };

        Ok(Config {
            path,
            calendar_url: file.calendar_url,
            timezone,
            timeout,
            rules: file.cycle,
            publish,
        })
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get the config directory path (~/.config/daycycle)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("daycycle");
    Ok(config_dir)
}

/// Get the config file path (~/.config/daycycle/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Read the config file, falling back to defaults when it does not exist.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}

/// Create a default config file with all options commented out.
pub fn create_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists at {}", path.display());
    }

    let contents = format!(
        "\
# daycycle configuration
#
# The update endpoint and its key are read from the environment:
#   {update_api}=https://example.com/api/daycycle
#   {api_key}=...

# Calendar page to scrape:
# calendar_url = \"{url}\"

# Timezone that decides what \"today\" is:
# timezone = \"{tz}\"

# Timeout for each HTTP request:
# timeout = \"{timeout}\"

[cycle]
# Days in the rotation:
# length = 6

# How the rotation starts before an explicit \"Day N\" appears
# (\"first-day-of-school\" or \"explicit-day-only\"):
# seed = \"first-day-of-school\"

# day_selector = \"div.fsStateHasEvents\"
# holiday_markers = [\"HOLIDAY\", \"School Closed\"]
# first_day_marker = \"1st Day of School\"

# [cycle.schedules]
# \"HS-ASchedule\" = \"A\"
# \"HS-BSchedule\" = \"B\"
# \"HS-CSchedule\" = \"C\"
# \"HS-DSchedule\" = \"D\"
",
        update_api = UPDATE_API_ENV,
        api_key = API_KEY_ENV,
        url = DEFAULT_CALENDAR_URL,
        tz = DEFAULT_TIMEZONE,
        timeout = DEFAULT_TIMEOUT,
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(())
}
