use anyhow::Result;
use async_trait::async_trait;
use jarvis_core::{Headline, NewsProvider};
use reqwest::Client;
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::require_key;

/// Top headlines from newsapi.org.
pub struct NewsApiProvider {
    client: Client,
    api_key: String,
    country: String,
    default_category: String,
    base_url: String,
}

impl NewsApiProvider {
    pub fn new(client: Client, api_key: String, country: String, default_category: String) -> Self {
        info!("Creating NewsApiProvider");
        Self {
            client,
            api_key,
            country,
            default_category,
            base_url: "https://newsapi.org/v2".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

fn parse_headlines(body: &Value) -> Vec<Headline> {
    body["articles"]
        .as_array()
        .map(|articles| {
            articles
                .iter()
                .filter_map(|article| article["title"].as_str())
                .filter(|title| !title.trim().is_empty())
                .map(|title| Headline {
                    title: title.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    async fn fetch(&self, category: Option<&str>) -> Result<Option<Vec<Headline>>> {
        require_key("NewsAPI", &self.api_key)?;

        let category = category.unwrap_or(&self.default_category);
        let url = Url::parse_with_params(
            &format!("{}/top-headlines", self.base_url),
            &[
                ("country", self.country.as_str()),
                ("category", category),
                ("apiKey", self.api_key.as_str()),
            ],
        )?;

        info!("Fetching {category} headlines");
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let headlines = parse_headlines(&body);
        Ok((!headlines.is_empty()).then_some(headlines))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_server::{client, request_line, serve_once};

    #[test]
    fn keeps_titled_articles_in_order() {
        let body = json!({
            "status": "ok",
            "articles": [
                { "title": "Rust 2024 ships" },
                { "title": null },
                { "title": "  " },
                { "title": "Ferris spotted" }
            ]
        });

        let titles: Vec<String> = parse_headlines(&body).into_iter().map(|h| h.title).collect();
        assert_eq!(titles, vec!["Rust 2024 ships", "Ferris spotted"]);
    }

    #[test]
    fn missing_articles_is_empty() {
        assert!(parse_headlines(&json!({ "status": "error" })).is_empty());
    }

    #[tokio::test]
    async fn requested_category_overrides_the_default() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"status":"ok","articles":[{"title":"Chips get faster"}]}"#,
        )
        .await;
        let provider = NewsApiProvider::new(
            client(),
            "k123".to_string(),
            "us".to_string(),
            "general".to_string(),
        )
        .with_base_url(base_url);

        let headlines = provider.fetch(Some("technology")).await.ok().flatten();
        let request = request_line(server).await;

        assert_eq!(
            headlines,
            Some(vec![Headline {
                title: "Chips get faster".to_string()
            }])
        );
        assert!(request.starts_with("GET /top-headlines?country=us&category=technology&apiKey=k123 "));
    }

    #[tokio::test]
    async fn server_error_is_a_failure() {
        let (base_url, server) = serve_once("500 Internal Server Error", "{}").await;
        let provider = NewsApiProvider::new(
            client(),
            "k123".to_string(),
            "us".to_string(),
            "general".to_string(),
        )
        .with_base_url(base_url);

        assert!(provider.fetch(None).await.is_err());
        request_line(server).await;
    }

    #[tokio::test]
    async fn unconfigured_key_fails_before_any_request() {
        let provider = NewsApiProvider::new(
            Client::new(),
            String::new(),
            "us".to_string(),
            "general".to_string(),
        );
        assert!(provider.fetch(None).await.is_err());
    }
}
