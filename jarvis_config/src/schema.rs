use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssistantConfig {
    #[serde(default = "AssistantConfig::default_name")]
    pub name: String,
    /// Pause after a failed turn, in milliseconds.
    #[serde(default = "AssistantConfig::default_error_cooldown_ms")]
    pub error_cooldown_ms: u64,
    /// Give up waiting for input after this many seconds and ask again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen_timeout_secs: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            error_cooldown_ms: Self::default_error_cooldown_ms(),
            listen_timeout_secs: None,
        }
    }
}

impl AssistantConfig {
    fn default_name() -> String {
        "Jarvis".to_string()
    }

    const fn default_error_cooldown_ms() -> u64 {
        1000
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SpeechConfig {
    /// Text-to-speech program run with the text as its last argument, e.g. `say` or `espeak`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts_command: Option<String>,
    #[serde(default)]
    pub tts_args: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewsConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "NewsConfig::default_country")]
    pub country: String,
    #[serde(default = "NewsConfig::default_category")]
    pub default_category: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            country: Self::default_country(),
            default_category: Self::default_category(),
        }
    }
}

impl NewsConfig {
    fn default_country() -> String {
        "us".to_string()
    }

    fn default_category() -> String {
        "general".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "WeatherConfig::default_units")]
    pub units: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            units: Self::default_units(),
        }
    }
}

impl WeatherConfig {
    fn default_units() -> String {
        "metric".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub engine_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "HttpConfig::default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl HttpConfig {
    const fn default_timeout_secs() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        "Mozilla/5.0 (compatible; jarvis/1.0)".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("jarvis"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// The saved config, or defaults when `jarvis init` has not been run yet.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        Self::load_from_or_default(&Self::config_path()?)
    }

    pub fn load_from_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            warn!(
                "No config at {}, running with defaults (run 'jarvis init' to add API keys)",
                path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your NewsAPI, OpenWeatherMap and Google Custom Search keys");
        println!("   2. Optionally set speech.tts_command (e.g. \"say\" or \"espeak\")");
        println!("   3. Run 'jarvis run' to start talking");
        println!();
        Ok(())
    }

    /// Whether an API key has been filled in rather than left blank or as the template placeholder.
    #[must_use]
    pub fn is_configured(key: &str) -> bool {
        !key.trim().is_empty() && !key.starts_with("your-")
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "assistant": {
    "name": "Jarvis",
    "error_cooldown_ms": 1000
  },
  "speech": {
    "tts_args": []
  },
  "providers": {
    "news": {
      "api_key": "your-newsapi-key-here",
      "country": "us",
      "default_category": "general"
    },
    "weather": {
      "api_key": "your-openweathermap-key-here",
      "units": "metric"
    },
    "search": {
      "api_key": "your-google-api-key-here",
      "engine_id": "your-search-engine-id-here"
    },
    "http": {
      "timeout_secs": 10
    }
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = match serde_json::from_str::<Config>("{}") {
            Ok(config) => config,
            Err(e) => panic!("empty config should parse: {e}"),
        };
        assert_eq!(config.assistant.name, "Jarvis");
        assert_eq!(config.assistant.error_cooldown_ms, 1000);
        assert_eq!(config.providers.news.default_category, "general");
        assert_eq!(config.providers.weather.units, "metric");
        assert_eq!(config.providers.http.timeout_secs, 10);
        assert!(config.speech.tts_command.is_none());
    }

    #[test]
    fn template_parses() {
        let parsed = serde_json::from_str::<Config>(CONFIG_TEMPLATE);
        assert!(parsed.is_ok(), "template must stay valid: {parsed:?}");
        let Ok(config) = parsed else { return };
        assert!(!Config::is_configured(&config.providers.news.api_key));
        assert!(!Config::is_configured(&config.providers.search.engine_id));
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("jarvis-config-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);

        let config = Config::load_from_or_default(&path);
        assert!(config.is_ok_and(|c| c.assistant.name == "Jarvis"));
    }

    #[test]
    fn saved_file_is_loaded_and_broken_file_is_an_error() {
        let saved = scratch_path("saved");
        let broken = scratch_path("broken");
        let written = std::fs::write(&saved, r#"{ "assistant": { "name": "Friday" } }"#)
            .and_then(|()| std::fs::write(&broken, "{ not json"));
        assert!(written.is_ok());

        let loaded = Config::load_from_or_default(&saved);
        let failed = Config::load_from_or_default(&broken);
        let _ = std::fs::remove_file(&saved);
        let _ = std::fs::remove_file(&broken);

        assert!(loaded.is_ok_and(|c| c.assistant.name == "Friday"));
        assert!(failed.is_err());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{ "assistant": { "name": "Friday" }, "providers": { "weather": { "api_key": "abc123" } } }"#;
        let config = match serde_json::from_str::<Config>(json) {
            Ok(config) => config,
            Err(e) => panic!("partial config should parse: {e}"),
        };
        assert_eq!(config.assistant.name, "Friday");
        assert_eq!(config.assistant.error_cooldown_ms, 1000);
        assert!(Config::is_configured(&config.providers.weather.api_key));
        assert_eq!(config.providers.weather.units, "metric");
    }
}
