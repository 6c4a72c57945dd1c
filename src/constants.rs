//! Application-wide constants and defaults
//!
//! Centralizes the values that the config file can override, plus the fixed
//! protocol strings used when talking to the model API.

/// Messages endpoint of the Anthropic API.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// API version sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Model used for the digest search.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-6";

/// Token budget for the digest response.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Request timeout in seconds. Web search turns are slow, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Server tool type for web search.
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

/// Name under which the web search tool is exposed to the model.
pub const WEB_SEARCH_TOOL_NAME: &str = "web_search";

/// Default SMTP relay (Gmail).
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";

/// SMTPS port (TLS from the first byte).
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Number of headlines requested from the model.
pub const DEFAULT_ITEM_COUNT: usize = 5;

/// Date format used in the prompt, the subject and the HTML heading.
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// User agent for outgoing HTTP requests.
pub const USER_AGENT: &str = concat!("ai-news-digest/", env!("CARGO_PKG_VERSION"));
