use std::fmt::Write as _;

use anyhow::Result;
use async_trait::async_trait;
use jarvis_core::InformationLookup;
use jarvis_tools::Browser;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::require_key;

const RESULT_COUNT: &str = "3";

/// Google Custom Search, falling back to a browser results page whenever
/// the API is unconfigured or the request fails.
pub struct GoogleLookup {
    client: Client,
    api_key: String,
    engine_id: String,
    browser: Browser,
    base_url: String,
}

impl GoogleLookup {
    pub fn new(client: Client, api_key: String, engine_id: String, browser: Browser) -> Self {
        info!("Creating GoogleLookup");
        Self {
            client,
            api_key,
            engine_id,
            browser,
            base_url: "https://www.googleapis.com/customsearch/v1".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn query_api(&self, query: &str) -> Result<Value> {
        require_key("Google Custom Search", &self.api_key)?;
        require_key("Google search engine", &self.engine_id)?;

        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("num", RESULT_COUNT),
            ],
        )?;

        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?)
    }
}

/// Numbered title and snippet list, or `None` when the response has no items.
fn format_results(query: &str, body: &Value) -> Option<String> {
    let items = body["items"].as_array().filter(|items| !items.is_empty())?;

    let mut text = format!("Here's what I found about {query}:\n");
    for (i, item) in items.iter().enumerate() {
        let title = item["title"].as_str().unwrap_or_default();
        let snippet = item["snippet"].as_str().unwrap_or_default();
        let _ = write!(text, "\n{}. {title}\n   {snippet}\n", i + 1);
    }
    Some(text.trim_end().to_string())
}

#[async_trait]
impl InformationLookup for GoogleLookup {
    async fn search(&self, query: &str) -> Result<Option<String>> {
        match self.query_api(query).await {
            Ok(body) => Ok(format_results(query, &body)),
            Err(e) => {
                warn!("Search API unavailable, opening browser instead: {e}");
                self.browser.open_search(query).await?;
                Ok(Some(format!(
                    "I've searched for '{query}' and opened the results in your browser."
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jarvis_tools::Launcher;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;
    use crate::test_server::{client, request_line, serve_once};

    #[derive(Default)]
    struct Recorder {
        opened: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Launcher for Recorder {
        async fn launch(&self, url: &Url) -> Result<()> {
            self.opened.lock().await.push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn numbers_each_result() {
        let body = json!({
            "items": [
                { "title": "Rust", "snippet": "A language empowering everyone." },
                { "title": "Rust (fungus)", "snippet": "Plant disease." }
            ]
        });

        assert_eq!(
            format_results("rust", &body).as_deref(),
            Some(
                "Here's what I found about rust:\n\n\
                 1. Rust\n   A language empowering everyone.\n\n\
                 2. Rust (fungus)\n   Plant disease."
            )
        );
    }

    #[test]
    fn no_items_is_nothing_found() {
        assert_eq!(format_results("zzz", &json!({})), None);
        assert_eq!(format_results("zzz", &json!({ "items": [] })), None);
    }

    #[tokio::test]
    async fn missing_credentials_open_the_browser() {
        let recorder = Arc::new(Recorder::default());
        let lookup = GoogleLookup::new(
            Client::new(),
            String::new(),
            String::new(),
            Browser::new(recorder.clone()),
        );

        let answer = lookup.search("quantum computing").await;

        assert_eq!(
            answer.ok().flatten().as_deref(),
            Some("I've searched for 'quantum computing' and opened the results in your browser.")
        );
        assert_eq!(
            *recorder.opened.lock().await,
            vec!["https://www.google.com/search?q=quantum+computing"]
        );
    }

    #[tokio::test]
    async fn configured_api_answers_without_the_browser() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"items":[{"title":"Mars","snippet":"The fourth planet."}]}"#,
        )
        .await;
        let recorder = Arc::new(Recorder::default());
        let lookup = GoogleLookup::new(
            client(),
            "k123".to_string(),
            "cx1".to_string(),
            Browser::new(recorder.clone()),
        )
        .with_base_url(base_url);

        let answer = lookup.search("mars").await;
        let request = request_line(server).await;

        assert_eq!(
            answer.ok().flatten().as_deref(),
            Some("Here's what I found about mars:\n\n1. Mars\n   The fourth planet.")
        );
        assert!(request.starts_with("GET /?q=mars&key=k123&cx=cx1&num=3 "));
        assert!(recorder.opened.lock().await.is_empty());
    }
}
