//! Auto-generated HTML directory listings.
//!
//! Produced for directories with no index file. Entries are sorted by
//! name, directories are shown with a trailing slash, names are
//! HTML-escaped and hrefs percent-encoded so arbitrary file names render
//! and link correctly.

use std::path::Path;

/// Render an HTML listing for `dir`, titled with the request path.
pub async fn render_listing(dir: &Path, display_path: &str) -> std::io::Result<String> {
    let mut entries: Vec<(String, bool)> = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let title = format!("Directory listing for {}", display_path);
    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n</head>\n", escape(&title)));
    html.push_str(&format!("<body>\n<h1>{}</h1>\n<hr>\n<ul>\n", escape(&title)));

    for (name, is_dir) in &entries {
        let mut href = urlencoding::encode(name).into_owned();
        let mut label = name.clone();
        if *is_dir {
            href.push('/');
            label.push('/');
        }
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            href,
            escape(&label)
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Minimal HTML escaping for text and attribute contexts.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
