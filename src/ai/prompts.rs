//! Prompt for the daily digest search

use chrono::NaiveDate;

use crate::constants::DATE_FORMAT;

/// Build the user prompt asking for today's top AI headlines.
///
/// The requested line format is what [`crate::digest::parser`] expects.
pub fn daily_digest(date: NaiveDate, item_count: usize) -> String {
    format!(
        "Today is {}. Search for the {} most important and interesting AI news articles \
         from the last 24 hours. Return ONLY a plain-text list in this exact format, \
         nothing else:\n\n\
         1. [Headline] | [One sentence summary] | [URL]\n\
         2. [Headline] | [One sentence summary] | [URL]\n\
         ... and so on.",
        date.format(DATE_FORMAT),
        item_count
    )
}
