//! # giphy-search
//!
//! A Giphy search tool for chat agents.
//!
//! One call searches Giphy for GIFs matching a query and returns a string the
//! agent can display directly: a JSON list of GIFs with ready-to-embed
//! markdown, or a plain-text error message. Progress is reported through an
//! optional [`StatusEmitter`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use giphy_search::{GiphyTool, TracingEmitter, Valves};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tool = GiphyTool::new(Valves::new("your-api-key"));
//!     let user = json!({"valves": {"GIF_RATING": "pg"}});
//!
//!     let output = tool.search_gifs("happy cat", Some(&TracingEmitter), &user).await;
//!     println!("{}", output);
//! }
//! ```

mod config;
mod error;
mod giphy;
mod status;
mod tool;

pub use config::{
    InvalidRating, Rating, UserValves, Valves, DEFAULT_API_BASE_URL, DEFAULT_GIF_LANG,
    DEFAULT_GIF_LIMIT,
};
pub use error::{GiphyError, Result};
pub use giphy::GifResult;
pub use status::{ChannelEmitter, SilentEmitter, StatusEmitter, StatusEvent, TracingEmitter};
pub use tool::{GiphyTool, ToolDefinition, TOOL_NAME};
