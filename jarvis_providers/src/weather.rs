use anyhow::Result;
use async_trait::async_trait;
use jarvis_core::{TemperatureUnit, WeatherProvider, WeatherReport};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::require_key;

/// Current conditions from api.openweathermap.org.
pub struct OpenWeatherProvider {
    client: Client,
    api_key: String,
    units: String,
    unit: TemperatureUnit,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(client: Client, api_key: String, units: String) -> Self {
        info!("Creating OpenWeatherProvider");
        Self {
            client,
            api_key,
            unit: unit_for(&units),
            units,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Temperature scale OpenWeatherMap answers in for a `units` parameter.
fn unit_for(units: &str) -> TemperatureUnit {
    match units {
        "imperial" => TemperatureUnit::Fahrenheit,
        "standard" => TemperatureUnit::Kelvin,
        _ => TemperatureUnit::Celsius,
    }
}

fn parse_report(body: &Value, unit: TemperatureUnit) -> Option<WeatherReport> {
    Some(WeatherReport {
        temperature: body["main"]["temp"].as_f64()?,
        unit,
        description: body["weather"][0]["description"].as_str()?.to_string(),
        humidity: body["main"]["humidity"].as_f64().unwrap_or_default(),
        wind_speed: body["wind"]["speed"].as_f64().unwrap_or_default(),
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, city: &str) -> Result<Option<WeatherReport>> {
        require_key("OpenWeatherMap", &self.api_key)?;

        let url = Url::parse_with_params(
            &format!("{}/weather", self.base_url),
            &[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ],
        )?;

        info!("Fetching weather for {city}");
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            info!("No weather data for {city}");
            return Ok(None);
        }

        let body = response.error_for_status()?.json::<Value>().await?;
        Ok(parse_report(&body, self.unit))
    }
}
