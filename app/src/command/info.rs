use jarvis_config::Config;
use jarvis_core::IntentRegistry;

/// Strategy for displaying configuration information.
///
/// API keys are masked. Intents are listed in precedence order.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let providers = &config.providers;

        println!("=== jarvis Configuration ===\n");
        println!("Config file: {}", Config::config_path()?.display());
        println!();

        println!("Assistant:");
        println!("  Name: {}", config.assistant.name);
        println!("  Error Cooldown: {} ms", config.assistant.error_cooldown_ms);
        match config.assistant.listen_timeout_secs {
            Some(secs) => println!("  Listen Timeout: {secs} s"),
            None => println!("  Listen Timeout: (none)"),
        }
        println!();

        println!("Speech:");
        match &config.speech.tts_command {
            Some(program) if config.speech.tts_args.is_empty() => println!("  TTS: {program}"),
            Some(program) => println!("  TTS: {program} {}", config.speech.tts_args.join(" ")),
            None => println!("  TTS: (off)"),
        }
        println!();

        println!("API Keys:");
        println!("  NewsAPI: {}", mask(&providers.news.api_key));
        println!("  OpenWeatherMap: {}", mask(&providers.weather.api_key));
        println!("  Google Search: {}", mask(&providers.search.api_key));
        println!("  Google Engine ID: {}", mask(&providers.search.engine_id));
        println!();

        println!("Providers:");
        println!(
            "  News: country={}, category={}",
            providers.news.country, providers.news.default_category
        );
        println!("  Weather Units: {}", providers.weather.units);
        println!("  HTTP Timeout: {} s", providers.http.timeout_secs);
        println!();

        println!("Intents (first match wins):");
        for (i, intent) in IntentRegistry::standard()?.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, intent.name());
        }

        Ok(())
    }
}

fn mask(key: &str) -> String {
    if !Config::is_configured(key) {
        return "(not set)".to_string();
    }

    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}
