//! Text escaping for the two page dialects and for raw HTML.

use super::PageFormat;

/// Characters Markdown reads as emphasis, code spans or links.
const MARKDOWN_SPECIALS: &[char] = &['*', '_', '`', '[', ']', '\\'];

/// Escape prose so MDX (or Markdown) does not read it as markup.
pub fn escape_text(text: &str, format: PageFormat) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' if format == PageFormat::Mdx => out.push_str("&#123;"),
            '}' if format == PageFormat::Mdx => out.push_str("&#125;"),
            c if MARKDOWN_SPECIALS.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape prose placed inside raw HTML, where backslash escapes do not
/// apply in plain Markdown.
pub fn escape_html_text(text: &str, format: PageFormat) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' if format == PageFormat::Mdx => out.push_str("&#123;"),
            '}' if format == PageFormat::Mdx => out.push_str("&#125;"),
            c if MARKDOWN_SPECIALS.contains(&c) => out.push_str(&format!("&#{};", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value.
pub fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape source code placed inside `<pre>`. Characters that Markdown or
/// MDX would otherwise interpret become numeric character references.
pub fn escape_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' | '}' | '*' | '_' | '`' | '[' | ']' | '\\' | '~' | '#' | '|' => {
                out.push_str(&format!("&#{};", c as u32))
            }
            _ => out.push(c),
        }
    }
    out
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Shortest backtick fence longer than any backtick run in `text`.
pub fn code_fence(text: &str) -> String {
    "`".repeat(longest_backtick_run(text).max(2) + 1)
}

/// Inline code span around `text`, whatever backticks it holds.
pub fn code_span(text: &str) -> String {
    let fence = "`".repeat(longest_backtick_run(text) + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mdx_escapes_braces() {
        assert_eq!(
            escape_text("vector<T> {x}", PageFormat::Mdx),
            "vector&lt;T&gt; &#123;x&#125;"
        );
        assert_eq!(escape_text("{x}", PageFormat::Md), "{x}");
    }

    #[test]
    fn markdown_specials_are_literal() {
        for format in [PageFormat::Mdx, PageFormat::Md] {
            assert_eq!(escape_text("a*b*c", format), r"a\*b\*c");
            assert_eq!(escape_text("__x__", format), r"\_\_x\_\_");
            assert_eq!(escape_text(r"[i] `q` \", format), r"\[i\] \`q\` \\");
        }
    }

    #[test]
    fn html_text_uses_references() {
        assert_eq!(
            escape_html_text("operator* (_a)", PageFormat::Md),
            "operator&#42; (&#95;a)"
        );
        assert_eq!(escape_html_text("{x}", PageFormat::Mdx), "&#123;x&#125;");
    }

    #[test]
    fn code_is_inert() {
        assert_eq!(escape_code("a[i] * *p"), "a&#91;i&#93; &#42; &#42;p");
        assert_eq!(escape_code("#include <x>"), "&#35;include &lt;x&gt;");
    }

    #[test]
    fn fence_outgrows_content() {
        assert_eq!(code_fence("plain"), "```");
        assert_eq!(code_fence("a ```` b"), "`````");
    }

    #[test]
    fn spans_hold_backticks() {
        assert_eq!(code_span("f(x)"), "`f(x)`");
        assert_eq!(code_span("a `b` c"), "``a `b` c``");
        assert_eq!(code_span("`tick"), "`` `tick ``");
    }

    #[test]
    fn attributes() {
        assert_eq!(escape_attribute(r#"a "b" & c"#), "a &quot;b&quot; &amp; c");
    }
}
