mod schema;

pub use schema::{
    AssistantConfig, Config, HttpConfig, NewsConfig, ProvidersConfig, SearchConfig, SpeechConfig,
    WeatherConfig,
};
