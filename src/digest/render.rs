//! HTML rendering for the digest email

use super::parser::{DigestLine, NewsItem};

const LI_OPEN: &str = r#"<li style="margin-bottom:16px;">"#;
const LINK_STYLE: &str = "font-size:16px;font-weight:bold;color:#1a0dab;text-decoration:none;";
const SUMMARY_STYLE: &str = "color:#555;font-size:14px;";

const FOOTER: &str =
    "Powered by Claude AI • Unsubscribe by disabling the GitHub Actions workflow";

/// Render one list item.
pub fn line(entry: &DigestLine) -> String {
    match entry {
        DigestLine::Item(item) => news_item(item),
        DigestLine::Raw(raw) => format!("{LI_OPEN}{}</li>", escape(raw)),
    }
}

fn news_item(item: &NewsItem) -> String {
    let headline = escape(&item.headline);
    let summary = escape(&item.summary);
    match &item.url {
        Some(url) => format!(
            r#"{LI_OPEN}<a href="{}" style="{LINK_STYLE}">{headline}</a><br><span style="{SUMMARY_STYLE}">{summary}</span></li>"#,
            escape(url)
        ),
        None => format!(
            r#"{LI_OPEN}<strong>{headline}</strong><br><span style="{SUMMARY_STYLE}">{summary}</span></li>"#
        ),
    }
}

/// Render the full HTML body. `date` is already formatted.
pub fn document(lines: &[DigestLine], date: &str) -> String {
    let items: String = lines.iter().map(line).collect();

    format!(
        r#"
<html><body style="font-family:Arial,sans-serif;max-width:620px;margin:auto;padding:24px;">
  <h2 style="color:#222;border-bottom:2px solid #e0e0e0;padding-bottom:8px;">
    {title}
  </h2>
  <ul style="padding-left:20px;">
    {items}
  </ul>
  <p style="color:#aaa;font-size:12px;margin-top:32px;">
    {FOOTER}
  </p>
</body></html>
"#,
        title = escape(&super::title(date)),
    )
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
