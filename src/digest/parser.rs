//! Best-effort parser for the model's `N. Headline | Summary | URL` lines

/// One headline from the digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub headline: String,
    /// May be empty when the model omitted it
    pub summary: String,
    pub url: Option<String>,
}

/// A non-empty line of the model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestLine {
    Item(NewsItem),
    /// Line with nothing usable once the list marker is gone, shown verbatim
    Raw(String),
}

/// Parse every non-empty line of `text`.
pub fn parse(text: &str) -> Vec<DigestLine> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Parse a single trimmed line. Never fails. A line without `|` becomes a
/// headline with no summary or URL; only a line with nothing left after
/// stripping (such as `1.` or `|`) comes back as [`DigestLine::Raw`].
pub fn parse_line(line: &str) -> DigestLine {
    let mut fields = line.split('|').map(str::trim);
    let headline = strip_numbering(fields.next().unwrap_or_default());
    let summary = fields.next().unwrap_or_default();
    let url = fields.next().unwrap_or_default();

    if headline.is_empty() && summary.is_empty() && url.is_empty() {
        return DigestLine::Raw(line.to_string());
    }

    DigestLine::Item(NewsItem {
        headline: headline.to_string(),
        summary: summary.to_string(),
        url: (!url.is_empty()).then(|| url.to_string()),
    })
}

/// Drop a leading list marker such as `1. ` or `10.`
fn strip_numbering(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(headline: &str, summary: &str, url: Option<&str>) -> DigestLine {
        DigestLine::Item(NewsItem {
            headline: headline.to_string(),
            summary: summary.to_string(),
            url: url.map(str::to_string),
        })
    }

    #[test]
    fn test_full_line() {
        assert_eq!(
            parse_line("1. New model released | It is faster. | https://example.com/a"),
            item("New model released", "It is faster.", Some("https://example.com/a"))
        );
    }

    #[test]
    fn test_missing_url() {
        assert_eq!(parse_line("2. Headline | Summary"), item("Headline", "Summary", None));
        assert_eq!(parse_line("3. Headline | Summary |   "), item("Headline", "Summary", None));
    }

    #[test]
    fn test_missing_summary() {
        assert_eq!(
            parse_line("4. Headline || https://example.com"),
            item("Headline", "", Some("https://example.com"))
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        assert_eq!(
            parse_line("5. H | S | https://example.com | extra"),
            item("H", "S", Some("https://example.com"))
        );
    }

    #[test]
    fn test_numbering_stripped_but_inner_digits_kept() {
        assert_eq!(
            parse_line("10. GPT 5.1 ships | S | https://x.io"),
            item("GPT 5.1 ships", "S", Some("https://x.io"))
        );
        assert_eq!(parse_line("Unnumbered | S"), item("Unnumbered", "S", None));
    }

    #[test]
    fn test_line_without_pipes_is_headline() {
        assert_eq!(
            parse_line("Here are today's top AI stories"),
            item("Here are today's top AI stories", "", None)
        );
        assert_eq!(parse_line("3. Only a headline"), item("Only a headline", "", None));
    }

    #[test]
    fn test_empty_headline_keeps_link() {
        assert_eq!(parse_line("1. | S | https://u"), item("", "S", Some("https://u")));
    }

    #[test]
    fn test_lines_with_nothing_left_are_raw() {
        assert_eq!(parse_line("1."), DigestLine::Raw("1.".to_string()));
        assert_eq!(parse_line("|"), DigestLine::Raw("|".to_string()));
        assert_eq!(parse_line("2. | |"), DigestLine::Raw("2. | |".to_string()));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = "\n1. A | B | https://a.com\n\n   \n2. C | D\r\nno pipes here\n...\n";
        assert_eq!(
            parse(text),
            vec![
                item("A", "B", Some("https://a.com")),
                item("C", "D", None),
                item("no pipes here", "", None),
                DigestLine::Raw("...".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("  \n \n").is_empty());
    }
}
