//! Name handling shared by the resolver and the renderer: splitting
//! qualified C++ names, stripping template arguments, and turning names
//! into URL path segments and in-page anchors.

use std::cmp::Ordering;

/// Split a qualified name on `::`, ignoring separators nested inside
/// template arguments or parentheses.
///
/// `"A::B<C::D>::E"` → `["A", "B<C::D>", "E"]`
pub fn split_qualified(name: &str) -> Vec<&str> {
    let bytes = name.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth -= 1,
            b':' if depth == 0 && i + 1 < bytes.len() && bytes[i + 1] == b':' => {
                parts.push(&name[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&name[start..]);
    parts
}

/// Remove balanced `<...>` groups: `"vector< T, A >"` → `"vector"`.
pub fn strip_template_args(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Turn one name into a URL path segment.
///
/// - lowercase
/// - keep alphanumerics and underscores
/// - every other run of characters becomes a single hyphen
/// - no leading or trailing hyphens
pub fn sanitize_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    if out.is_empty() {
        out.push_str("anonymous");
    }
    out
}

/// Path made of sanitized segments.
pub fn sanitize_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(sanitize_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// In-page anchor for a member name. Operators keep a readable suffix so
/// `operator==` and `operator<` do not all collapse to `operator`.
pub fn member_anchor(name: &str) -> String {
    if let Some(op) = name.strip_prefix("operator") {
        let op = op.trim();
        if !op.is_empty() && !op.chars().next().is_some_and(char::is_alphanumeric) {
            return format!("operator-{}", operator_word(op));
        }
    }
    sanitize_segment(name)
}

fn operator_word(op: &str) -> String {
    let word = match op {
        "==" => "eq",
        "!=" => "ne",
        "<" => "lt",
        "<=" => "le",
        ">" => "gt",
        ">=" => "ge",
        "<=>" => "spaceship",
        "=" => "assign",
        "+" => "plus",
        "-" => "minus",
        "*" => "star",
        "/" => "slash",
        "%" => "mod",
        "+=" => "plus-assign",
        "-=" => "minus-assign",
        "*=" => "star-assign",
        "/=" => "slash-assign",
        "<<" => "shl",
        ">>" => "shr",
        "<<=" => "shl-assign",
        ">>=" => "shr-assign",
        "&" => "and",
        "|" => "or",
        "^" => "xor",
        "~" => "not",
        "!" => "lnot",
        "&&" => "land",
        "||" => "lor",
        "++" => "inc",
        "--" => "dec",
        "()" => "call",
        "[]" => "index",
        "->" => "arrow",
        "," => "comma",
        _ => return sanitize_segment(op),
    };
    word.to_string()
}

/// Case-insensitive name ordering with a case-sensitive tie-break, so
/// `alpha < Beta < beta < gamma` regardless of capitalisation.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Uppercase first letter used to bucket alphabetical indices.
pub fn index_letter(name: &str) -> char {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .unwrap_or('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_simple() {
        assert_eq!(split_qualified("A::B"), vec!["A", "B"]);
        assert_eq!(split_qualified("B"), vec!["B"]);
    }

    #[test]
    fn split_respects_templates() {
        assert_eq!(
            split_qualified("A::B< C::D >::E"),
            vec!["A", "B< C::D >", "E"]
        );
    }

    #[test]
    fn strip_templates() {
        assert_eq!(strip_template_args("vector< T, A >"), "vector");
        assert_eq!(strip_template_args("map< K, pair< A, B > >"), "map");
        assert_eq!(strip_template_args("plain"), "plain");
    }

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_segment("B"), "b");
        assert_eq!(sanitize_segment("(anonymous namespace)"), "anonymous-namespace");
        assert_eq!(sanitize_segment("main.cpp"), "main-cpp");
        assert_eq!(sanitize_segment("snake_case"), "snake_case");
        assert_eq!(sanitize_segment("@0"), "0");
        assert_eq!(sanitize_segment("::"), "anonymous");
    }

    #[test]
    fn sanitize_path_joins() {
        assert_eq!(sanitize_path(["A", "B"]), "a/b");
    }

    #[test]
    fn operator_anchors() {
        assert_eq!(member_anchor("operator=="), "operator-eq");
        assert_eq!(member_anchor("operator[]"), "operator-index");
        assert_eq!(member_anchor("operator bool"), "operator-bool");
        assert_eq!(member_anchor("operation"), "operation");
        assert_eq!(member_anchor("~Foo"), "foo");
    }

    #[test]
    fn name_ordering() {
        let mut names = vec!["gamma", "beta", "Beta", "alpha"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["alpha", "Beta", "beta", "gamma"]);
    }

    #[test]
    fn letters() {
        assert_eq!(index_letter("vector"), 'V');
        assert_eq!(index_letter("_impl"), 'I');
        assert_eq!(index_letter("::"), '#');
    }
}
