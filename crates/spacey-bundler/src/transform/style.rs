// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Stylesheet modules.

use crate::code::CodeBuilder;

/// Escape `text` for embedding between backticks
pub fn escape_template_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Compile a stylesheet into code that appends a `<style>` element to the
/// document head when the module is evaluated.
pub fn transform_style(source: &str) -> String {
    let mut code = CodeBuilder::new();
    code.line("const style = document.createElement(\"style\");")
        .line(format!("const css = `{}`;", escape_template_text(source)))
        .open("if (style.styleSheet) {")
        .line("style.styleSheet.cssText = css;")
        .reopen("} else {")
        .line("style.appendChild(document.createTextNode(css));")
        .close("}")
        .line("document.head.appendChild(style);");
    code.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaping() {
        assert_eq!(escape_template_text("a`b"), "a\\`b");
        assert_eq!(escape_template_text("${x}"), "\\${x}");
        assert_eq!(escape_template_text("content: '\\201C'"), "content: '\\\\201C'");
        assert_eq!(escape_template_text("$ {}"), "$ {}");
    }

    #[test]
    fn test_no_unescaped_breakouts() {
        let compiled = transform_style("a::after { content: \"`${evil}`\"; }");
        let css_line = compiled.lines().nth(1).unwrap();
        let inner = css_line
            .strip_prefix("const css = `")
            .and_then(|rest| rest.strip_suffix("`;"))
            .unwrap();
        let mut chars = inner.chars().peekable();
        let mut escaped = false;
        while let Some(ch) = chars.next() {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '`' => panic!("unescaped backtick in {inner}"),
                '$' => assert_ne!(chars.peek(), Some(&'{'), "unescaped interpolation in {inner}"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_injection_code_shape() {
        let compiled = transform_style("p { color: red; }");
        assert_eq!(
            compiled,
            "const style = document.createElement(\"style\");\n\
             const css = `p { color: red; }`;\n\
             if (style.styleSheet) {\n\
             \x20 style.styleSheet.cssText = css;\n\
             } else {\n\
             \x20 style.appendChild(document.createTextNode(css));\n\
             }\n\
             document.head.appendChild(style);\n"
        );
    }
}
