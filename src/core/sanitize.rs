// src/core/sanitize.rs

/// Squeeze layout whitespace out of raw markup before parsing.
///
/// Each run of tabs, newlines and spaces becomes a single space, except right
/// after a `>` where it is dropped entirely. Keeps cell text free of the
/// indentation the page was written with.
pub fn minify(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut need_space = false;
    for ch in html.chars() {
        match ch {
            '\t' | '\n' | ' ' => {
                if need_space { out.push(' '); }
                need_space = false;
            }
            _ => {
                out.push(ch);
                need_space = ch != '>';
            }
        }
    }
    out
}
