use chrono::Datelike;

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Formats an RFC 3339 publication date the way the site displays it,
/// e.g. "15 mar 2021". Accepts both `+00:00` and `+0000` offsets, the
/// latter being what the CMS actually emits.
pub fn format_date_pt(raw: &str) -> Option<String> {
    let date = chrono::DateTime::parse_from_rfc3339(raw)
        .or_else(|_| chrono::DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()?;
    Some(format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_PT[date.month0() as usize],
        date.year()
    ))
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// The single place a character gets HTML-escaped; `escape_html` and
/// the rich-text renderer both go through here.
pub fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}
