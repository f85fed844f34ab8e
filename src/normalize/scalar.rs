/// Trim leading and trailing whitespace from every line of `value`.
///
/// Lines are separated by `\r\n`, `\n` or a lone `\r`. Separators are copied
/// through exactly as found (a trailing one included), so the function is
/// idempotent. A value without line breaks is simply trimmed.
pub fn strip_spaces(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(at) = rest.find(|c: char| c == '\r' || c == '\n') {
        out.push_str(rest[..at].trim());
        let sep_len = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
        out.push_str(&rest[at..at + sep_len]);
        rest = &rest[at + sep_len..];
    }
    out.push_str(rest.trim());
    out
}
