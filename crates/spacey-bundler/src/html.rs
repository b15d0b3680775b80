// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! HTML shell generation

use tracing::warn;

/// File name of the generated HTML shell
pub const HTML_FILE_NAME: &str = "index.html";

/// Template used when none is configured
pub const DEFAULT_TEMPLATE: &str = "<!DOCTYPE html>
<html>
<head>
  <meta charset=\"utf-8\">
</head>
<body>
</body>
</html>
";

/// Insert one `<script>` tag per file name before the first closing body
/// tag of `template`, or at the end if there is none.
pub fn inject_scripts(template: &str, scripts: &[&str]) -> String {
    let tags: String = scripts
        .iter()
        .map(|name| format!("<script src=\"/{}\"></script>\n", escape_attribute(name)))
        .collect();

    let mut html = String::with_capacity(template.len() + tags.len() + 1);
    match find_closing_body(template) {
        Some(position) => {
            html.push_str(&template[..position]);
            html.push_str(&tags);
            html.push_str(&template[position..]);
        }
        None => {
            warn!("HTML template has no closing body tag, appending scripts at the end");
            html.push_str(template);
            if !html.is_empty() && !html.ends_with('\n') {
                html.push('\n');
            }
            html.push_str(&tags);
        }
    }
    html
}

/// Byte offset of the first `</body>` (any ASCII case, optional whitespace
/// before `>`)
fn find_closing_body(template: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets
    let lower = template.to_ascii_lowercase();
    let mut from = 0;
    while let Some(found) = lower[from..].find("</body") {
        let start = from + found;
        let rest = lower[start + "</body".len()..].trim_start();
        if rest.starts_with('>') {
            return Some(start);
        }
        from = start + 1;
    }
    None
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            ch => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_before_closing_body() {
        let html = inject_scripts("<html><body><p>hi</p></body></html>", &["bundle.js"]);
        assert_eq!(
            html,
            "<html><body><p>hi</p><script src=\"/bundle.js\"></script>\n</body></html>"
        );
    }

    #[test]
    fn test_case_insensitive_and_first_match() {
        let html = inject_scripts("<BODY></Body >\n<!-- </body> -->", &["a.js", "b.js"]);
        assert_eq!(
            html,
            "<BODY><script src=\"/a.js\"></script>\n<script src=\"/b.js\"></script>\n</Body >\n<!-- </body> -->"
        );
    }

    #[test]
    fn test_ignores_lookalike_tags() {
        let html = inject_scripts("<bodyguard></bodyguard>", &["bundle.js"]);
        assert_eq!(html, "<bodyguard></bodyguard>\n<script src=\"/bundle.js\"></script>\n");
    }

    #[test]
    fn test_missing_body_appends() {
        assert_eq!(inject_scripts("", &["x.js"]), "<script src=\"/x.js\"></script>\n");
    }

    #[test]
    fn test_attribute_escaping() {
        let html = inject_scripts("</body>", &["a\"b&c.js"]);
        assert_eq!(html, "<script src=\"/a&quot;b&amp;c.js\"></script>\n</body>");
    }

    #[test]
    fn test_default_template_has_body() {
        assert!(find_closing_body(DEFAULT_TEMPLATE).is_some());
    }
}
