//! Escaping and layout helpers for text spliced into templates.

/// Quote `text` as a double-quoted string literal valid in Python and JavaScript.
pub fn quoted(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Render a list of strings as a `["a", "b"]` literal.
pub fn string_list(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quoted(item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Make `text` safe inside a triple-quoted Python docstring.
pub fn docstring_safe(text: &str) -> String {
    text.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
}

/// Make `text` safe inside a JavaScript block comment.
pub fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

/// Prefix every non-blank line of `text` with `width` spaces; blank lines stay empty.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the indentation common to every non-blank line.
pub fn dedent(text: &str) -> String {
    let common = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|line| line.get(common..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether some line of `code` is a `return` statement.
///
/// `return` must stand alone as a word, so `returned_rows = ...` does not count.
pub fn has_return(code: &str) -> bool {
    code.lines().any(|line| {
        line.trim_start().strip_prefix("return").is_some_and(|rest| {
            !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_escaped() {
        assert_eq!(quoted(r#"Say "hi""#), r#""Say \"hi\"""#);
        assert_eq!(string_list(&["a", "b"]), r#"["a", "b"]"#);
        assert_eq!(docstring_safe(r#"x """ y"#), r#"x \"\"\" y"#);
        assert_eq!(comment_safe("a */ b"), "a * / b");
    }

    #[test]
    fn indent_leaves_blank_lines_empty() {
        assert_eq!(indent("a\n  b\n\nc", 4), "    a\n      b\n\n    c");
    }

    #[test]
    fn dedent_keeps_relative_layout() {
        assert_eq!(dedent("    if x:\n        y()\n\n    z()"), "if x:\n    y()\n\nz()");
    }

    #[test]
    fn return_is_matched_as_a_whole_word() {
        assert!(has_return("user = db.get(1)\nreturn user"));
        assert!(has_return("    return"));
        assert!(has_return("return(result)"));
        assert!(has_return("return;"));
        assert!(!has_return("returned_rows = db.query(Row).all()"));
        assert!(!has_return("return_value = 3\nresult = {}"));
    }
}
