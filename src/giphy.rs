//! Giphy wire types and the result records handed back to the agent.

use serde::{Deserialize, Serialize};

/// Body of `GET /gifs/search`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub data: Vec<Gif>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Gif {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    pub url: String,
    pub images: GifImages,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GifImages {
    pub original: GifImage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GifImage {
    pub url: String,
}

/// A GIF ready to show in chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifResult {
    /// Title of the GIF, or "No title".
    pub title: String,
    /// Alt text of the GIF, or "No description".
    pub description: String,
    /// Markdown image plus the attribution link.
    pub markdown: String,
}

impl GifResult {
    /// Builds the markdown embed for an image and its Giphy page.
    pub fn embed(image_url: &str, page_url: &str) -> String {
        format!("![giphy]({}) [via GIPHY]({})", image_url, page_url)
    }

    pub(crate) fn from_gif(gif: Gif) -> Self {
        let markdown = GifResult::embed(&gif.images.original.url, &gif.url);
        Self {
            title: non_empty_or(gif.title, "No title"),
            description: non_empty_or(gif.alt_text, "No description"),
            markdown,
        }
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_gif_result_defaults_for_empty_fields() {
        let response = parse(
            r#"{"data":[{"title":"","alt_text":"","url":"https://g/x","images":{"original":{"url":"https://i/x.gif"}}}]}"#,
        );
        let gif = response.data.into_iter().next().unwrap();
        let result = GifResult::from_gif(gif);
        assert_eq!(result.title, "No title");
        assert_eq!(result.description, "No description");
        assert_eq!(result.markdown, "![giphy](https://i/x.gif) [via GIPHY](https://g/x)");
    }

    #[test]
    fn test_gif_result_null_and_missing_fields() {
        let response = parse(
            r#"{"data":[{"title":null,"url":"https://g/y","images":{"original":{"url":"https://i/y.gif"}}}]}"#,
        );
        let result = GifResult::from_gif(response.data.into_iter().next().unwrap());
        assert_eq!(result.title, "No title");
        assert_eq!(result.description, "No description");
    }

    #[test]
    fn test_gif_result_keeps_provider_text() {
        let response = parse(
            r#"{"data":[{"title":"Happy Cat","alt_text":"a cat smiling","url":"https://g/c","images":{"original":{"url":"https://i/c.gif","width":"480"}},"rating":"g"}]}"#,
        );
        let result = GifResult::from_gif(response.data.into_iter().next().unwrap());
        assert_eq!(result.title, "Happy Cat");
        assert_eq!(result.description, "a cat smiling");
    }

    #[test]
    fn test_search_response_missing_data() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"meta":{}}"#).is_err());
    }

    #[test]
    fn test_search_response_missing_image() {
        let err = serde_json::from_str::<SearchResponse>(
            r#"{"data":[{"title":"t","url":"https://g/x","images":{}}]}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_gif_result_serialization_fields() {
        let result = GifResult {
            title: "t".into(),
            description: "d".into(),
            markdown: "m".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("description"));
        assert!(obj.contains_key("markdown"));
    }
}
