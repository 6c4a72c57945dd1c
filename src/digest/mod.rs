//! The daily digest: model text parsed into news items and rendered as HTML

pub mod parser;
pub mod render;

use chrono::NaiveDate;

use crate::constants::DATE_FORMAT;

pub use parser::{DigestLine, NewsItem};

/// Heading and subject line for the digest of `date`.
pub fn title(date: &str) -> String {
    format!("🤖 Daily AI News — {}", date)
}

#[derive(Debug, Clone)]
pub struct Digest {
    date: NaiveDate,
    plain_text: String,
    lines: Vec<DigestLine>,
}

impl Digest {
    /// Build a digest from the model's reply. Never fails; unparseable lines
    /// are kept as raw lines.
    pub fn new(date: NaiveDate, text: &str) -> Self {
        let plain_text = text.trim().to_string();
        let lines = parser::parse(&plain_text);
        Self {
            date,
            plain_text,
            lines,
        }
    }

    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn subject(&self) -> String {
        title(&self.formatted_date())
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    /// Successfully parsed news items, in order
    pub fn items(&self) -> impl Iterator<Item = &NewsItem> {
        self.lines.iter().filter_map(|line| match line {
            DigestLine::Item(item) => Some(item),
            DigestLine::Raw(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn html(&self) -> String {
        render::document(&self.lines, &self.formatted_date())
    }
}
