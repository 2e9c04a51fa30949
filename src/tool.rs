//! The `search_gifs` tool exposed to chat agents.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::{UserValves, Valves};
use crate::giphy::{GifResult, SearchResponse};
use crate::status::{SilentEmitter, StatusEmitter, StatusEvent};
use crate::{GiphyError, Result};

/// Name the tool is advertised under.
pub const TOOL_NAME: &str = "search_gifs";

const TOOL_DESCRIPTION: &str = "Search for GIFs on Giphy. When displaying a GIF, you MUST ALWAYS \
include the full markdown image and attribution. Returns a JSON list where each entry has a \
title, a description (alt text) and the markdown to display the GIF in the chat.";

const USER_AGENT: &str = concat!("giphy-search/", env!("CARGO_PKG_VERSION"));

/// Schema an agent host uses to advertise the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Giphy search tool.
///
/// Holds the operator [`Valves`] and nothing else, so one instance can serve
/// any number of concurrent callers.
///
/// Every outcome, including failures, comes back as a `String`: either a
/// pretty-printed JSON array of [`GifResult`] or a plain-text error message
/// the agent can show as-is.
#[derive(Debug, Clone, Default)]
pub struct GiphyTool {
    valves: Valves,
}

impl GiphyTool {
    /// Creates a tool with the given operator settings.
    pub fn new(valves: Valves) -> Self {
        Self { valves }
    }

    /// Returns the operator settings.
    pub fn valves(&self) -> &Valves {
        &self.valves
    }

    /// Returns the tool's name, description and argument schema.
    pub fn definition() -> ToolDefinition {
        ToolDefinition {
            name: TOOL_NAME.to_string(),
            description: TOOL_DESCRIPTION.to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search term to find a GIF."
                    }
                },
                "required": ["query"]
            }),
        }
    }

    /// Runs the tool from JSON arguments of the form `{"query": "..."}`.
    ///
    /// A missing or non-string `query` is treated as an empty query.
    pub async fn call(
        &self,
        args: &Value,
        emitter: Option<&dyn StatusEmitter>,
        user: &Value,
    ) -> String {
        let query = args.get("query").and_then(Value::as_str).unwrap_or_default();
        self.search_gifs(query, emitter, user).await
    }

    /// Searches Giphy for `query`.
    ///
    /// `user` is the caller context; its `valves` object supplies language
    /// and rating preferences. A `None` emitter discards status events.
    pub async fn search_gifs(
        &self,
        query: &str,
        emitter: Option<&dyn StatusEmitter>,
        user: &Value,
    ) -> String {
        let emitter = emitter.unwrap_or(&SilentEmitter);

        match self.try_search(query, emitter, user).await {
            Ok(json) => json,
            Err(e) if e.is_expected() => {
                debug!("GIF search for '{}' ended early: {}", query, e);
                e.to_string()
            }
            Err(e) => {
                warn!("GIF search for '{}' failed: {}", query, e);
                e.to_string()
            }
        }
    }

    async fn try_search(
        &self,
        query: &str,
        emitter: &dyn StatusEmitter,
        user: &Value,
    ) -> Result<String> {
        let prefs = UserValves::from_user(user);

        if !self.valves.has_api_key() {
            return Err(GiphyError::MissingApiKey);
        }
        if query.is_empty() {
            return Err(GiphyError::EmptyQuery);
        }

        emitter
            .emit(StatusEvent::progress(format!("Searching Giphy for: {}", query)))
            .await;

        let url = self.search_url(query, &prefs);
        debug!(
            query,
            limit = self.valves.gif_limit(),
            rating = %prefs.gif_rating,
            lang = %prefs.gif_lang,
            "Requesting Giphy search"
        );

        // Client lives for this call only.
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(&url).send().await?;

        let status = response.status();
        debug!("Giphy responded with status {}", status);
        if status == StatusCode::FORBIDDEN {
            return Err(GiphyError::Forbidden);
        }
        if status != StatusCode::OK {
            return Err(GiphyError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&body)?;

        if search.data.is_empty() {
            return Err(GiphyError::NoResults(query.to_string()));
        }

        emitter
            .emit(StatusEvent::done(format!(
                "Found {} GIFs from query: {}",
                search.data.len(),
                query
            )))
            .await;

        let results: Vec<GifResult> = search
            .data
            .into_iter()
            .map(GifResult::from_gif)
            .collect();
        Ok(serde_json::to_string_pretty(&results)?)
    }

    /// Builds the search URL. Parameter values are percent-encoded.
    pub fn search_url(&self, query: &str, prefs: &UserValves) -> String {
        format!(
            "{}/gifs/search?api_key={}&q={}&limit={}&offset=0&rating={}&lang={}",
            self.valves.base_url().trim_end_matches('/'),
            urlencoding::encode(self.valves.api_key()),
            urlencoding::encode(query),
            self.valves.gif_limit(),
            prefs.gif_rating.as_str(),
            urlencoding::encode(&prefs.gif_lang),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rating;

    #[test]
    fn test_definition() {
        let def = GiphyTool::definition();
        assert_eq!(def.name, "search_gifs");
        assert!(def.description.contains("markdown"));
        let props = def.parameters.get("properties").unwrap();
        assert_eq!(props["query"]["type"], "string");
        let required = def.parameters["required"].as_array().unwrap();
        assert!(required.contains(&json!("query")));
    }

    #[test]
    fn test_tool_debug_redacts_key() {
        let tool = GiphyTool::new(Valves::new("SUPER-SECRET-KEY"));
        assert!(!format!("{:?}", tool).contains("SUPER-SECRET-KEY"));
    }

    #[test]
    fn test_search_url_defaults() {
        let tool = GiphyTool::new(Valves::new("KEY"));
        let url = tool.search_url("cat", &UserValves::default());
        assert_eq!(
            url,
            "https://api.giphy.com/v1/gifs/search?api_key=KEY&q=cat&limit=6&offset=0&rating=g&lang=en"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let tool = GiphyTool::new(Valves::new("KEY"));
        let url = tool.search_url("cats & dogs #1", &UserValves::default());
        assert!(url.contains("&q=cats%20%26%20dogs%20%231&"));
    }

    #[test]
    fn test_search_url_preferences_and_base() {
        let tool = GiphyTool::new(
            Valves::new("KEY")
                .with_base_url("http://localhost:8080/v1/")
                .with_gif_limit(2),
        );
        let prefs = UserValves::default().with_lang("en,fr").with_rating(Rating::Pg13);
        let url = tool.search_url("x", &prefs);
        assert!(url.starts_with("http://localhost:8080/v1/gifs/search?"));
        assert!(url.contains("&limit=2&"));
        assert!(url.contains("&rating=pg-13&"));
        assert!(url.ends_with("&lang=en%2Cfr"));
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let tool = GiphyTool::default();
        let result = tool.search_gifs("cat", None, &Value::Null).await;
        assert_eq!(result, "ERROR: GIPHY_API_KEY is not set in Valves configuration.");
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let tool = GiphyTool::new(Valves::new("KEY"));
        let result = tool.search_gifs("", None, &json!({})).await;
        assert_eq!(result, "ERROR: No search query provided.");
    }

    #[tokio::test]
    async fn test_api_key_checked_before_query() {
        let tool = GiphyTool::default();
        let result = tool.search_gifs("", None, &json!({})).await;
        assert_eq!(result, "ERROR: GIPHY_API_KEY is not set in Valves configuration.");
    }

    #[tokio::test]
    async fn test_call_without_query_argument() {
        let tool = GiphyTool::new(Valves::new("KEY"));
        let result = tool.call(&json!({"q": "cat"}), None, &json!({})).await;
        assert_eq!(result, "ERROR: No search query provided.");
    }
}
