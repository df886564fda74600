//! Omnibox (search box) usage events
//!
//! An `OmniboxLog` describes one accepted omnibox interaction: what the
//! user typed, how the input was classified, and the suggestions shown.
//! The typed text itself never leaves the process; only its length and
//! term count are reported.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// Input classification
// ============================================================================

/// How the omnibox classified the typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputType {
    Invalid,
    Unknown,
    RequestedUrl,
    Url,
    Query,
    ForcedQuery,
}

impl InputType {
    /// Name used by the legacy encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Invalid => "invalid",
            InputType::Unknown => "unknown",
            InputType::RequestedUrl => "requested-url",
            InputType::Url => "url",
            InputType::Query => "query",
            InputType::ForcedQuery => "forced-query",
        }
    }
}

impl Display for InputType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid" => Ok(InputType::Invalid),
            "unknown" => Ok(InputType::Unknown),
            "requested-url" => Ok(InputType::RequestedUrl),
            "url" => Ok(InputType::Url),
            "query" => Ok(InputType::Query),
            "forced-query" => Ok(InputType::ForcedQuery),
            other => Err(DomainError::UnknownInputType(other.to_string())),
        }
    }
}

// ============================================================================
// Suggestion classification
// ============================================================================

/// Kind of suggestion produced by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    UrlWhatYouTyped,
    HistoryUrl,
    HistoryTitle,
    HistoryBody,
    HistoryKeyword,
    Navsuggest,
    SearchWhatYouTyped,
    SearchHistory,
    SearchSuggest,
    SearchOtherEngine,
    ExtensionApp,
}

impl MatchType {
    /// Name used by the legacy encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::UrlWhatYouTyped => "url-what-you-typed",
            MatchType::HistoryUrl => "history-url",
            MatchType::HistoryTitle => "history-title",
            MatchType::HistoryBody => "history-body",
            MatchType::HistoryKeyword => "history-keyword",
            MatchType::Navsuggest => "navsuggest",
            MatchType::SearchWhatYouTyped => "search-what-you-typed",
            MatchType::SearchHistory => "search-history",
            MatchType::SearchSuggest => "search-suggest",
            MatchType::SearchOtherEngine => "search-other-engine",
            MatchType::ExtensionApp => "extension-app",
        }
    }
}

impl Display for MatchType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url-what-you-typed" => Ok(MatchType::UrlWhatYouTyped),
            "history-url" => Ok(MatchType::HistoryUrl),
            "history-title" => Ok(MatchType::HistoryTitle),
            "history-body" => Ok(MatchType::HistoryBody),
            "history-keyword" => Ok(MatchType::HistoryKeyword),
            "navsuggest" => Ok(MatchType::Navsuggest),
            "search-what-you-typed" => Ok(MatchType::SearchWhatYouTyped),
            "search-history" => Ok(MatchType::SearchHistory),
            "search-suggest" => Ok(MatchType::SearchSuggest),
            "search-other-engine" => Ok(MatchType::SearchOtherEngine),
            "extension-app" => Ok(MatchType::ExtensionApp),
            other => Err(DomainError::UnknownMatchType(other.to_string())),
        }
    }
}

/// Suggestion provider classification, derived from the provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderType {
    UnknownProvider,
    Url,
    HistoryContents,
    HistoryQuick,
    Search,
    Keyword,
    Builtin,
    Shortcuts,
    ExtensionApps,
}

impl ProviderType {
    /// Maps a provider name to its classification. Unrecognized names
    /// map to `UnknownProvider`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "HistoryURL" => ProviderType::Url,
            "HistoryContents" => ProviderType::HistoryContents,
            "HistoryQuickProvider" => ProviderType::HistoryQuick,
            "Search" => ProviderType::Search,
            "Keyword" => ProviderType::Keyword,
            "Builtin" => ProviderType::Builtin,
            "ShortcutsProvider" => ProviderType::Shortcuts,
            "ExtensionApps" => ProviderType::ExtensionApps,
            _ => ProviderType::UnknownProvider,
        }
    }
}

// ============================================================================
// Event
// ============================================================================

/// One suggestion shown in the omnibox dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteMatch {
    /// Name of the provider that produced the suggestion, if known.
    pub provider: Option<String>,
    pub match_type: MatchType,
    pub relevance: i32,
    pub starred: bool,
}

/// An accepted omnibox interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmniboxLog {
    pub text: String,
    pub input_type: InputType,
    pub tab_id: Option<i32>,
    pub selected_index: i32,
    pub inline_autocompleted_length: i32,
    /// Time between the first edit and acceptance, when it was tracked.
    pub elapsed_since_first_modified: Option<Duration>,
    pub results: Vec<AutocompleteMatch>,
}

impl OmniboxLog {
    pub fn new(text: impl Into<String>, input_type: InputType) -> Self {
        Self {
            text: text.into(),
            input_type,
            tab_id: None,
            selected_index: 0,
            inline_autocompleted_length: 0,
            elapsed_since_first_modified: None,
            results: Vec::new(),
        }
    }

    /// Length of the typed text in characters.
    pub fn typed_length(&self) -> i32 {
        i32::try_from(self.text.chars().count()).unwrap_or(i32::MAX)
    }

    /// Number of whitespace-separated terms in the typed text.
    pub fn num_terms(&self) -> i32 {
        i32::try_from(self.text.split_whitespace().count()).unwrap_or(i32::MAX)
    }

    /// Typing duration in milliseconds, when tracked.
    pub fn typing_duration_ms(&self) -> Option<i64> {
        self.elapsed_since_first_modified
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}
