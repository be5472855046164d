//! Minimal line-based formatting for assistant answers.

use ammonia::Builder;

/// Converts an assistant answer into sanitized HTML, one element per line.
///
/// Recognized line forms: `## ` and `### ` headings, `- ` or `• ` bullets
/// (rendered indented, marker kept), a whole line wrapped in `**` (bold) and
/// blank lines (a non-breaking space paragraph).
pub fn render_markdown_lite(text: &str) -> String {
    let mut html = String::new();

    for line in text.lines() {
        let line = line.trim_end();
        if let Some(heading) = line.strip_prefix("## ") {
            push_element(&mut html, "h3", "h5 mt-2 mb-1", heading);
        } else if let Some(heading) = line.strip_prefix("### ") {
            push_element(&mut html, "h4", "h6 mt-2 mb-1", heading);
        } else if line.starts_with("- ") || line.starts_with("• ") {
            push_element(&mut html, "p", "ms-3 mb-0", line);
        } else if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
            push_element(&mut html, "p", "fw-semibold mb-0", &line[2..line.len() - 2]);
        } else if line.trim().is_empty() {
            html.push_str("<p class=\"mb-0\">&nbsp;</p>");
        } else {
            push_element(&mut html, "p", "mb-0", line);
        }
    }

    Builder::default()
        .add_generic_attributes(&["class"])
        .clean(&html)
        .to_string()
}

fn push_element(html: &mut String, tag: &str, class: &str, content: &str) {
    html.push_str(&format!(
        "<{tag} class=\"{class}\">{}</{tag}>",
        ammonia::clean_text(content)
    ));
}
