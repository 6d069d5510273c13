/// Display grouping applied to 13-digit codes: prefix, group, publisher, title, check digit.
const ISBN13_GROUPS: [usize; 5] = [3, 1, 3, 5, 1];

/// Returns true when `code` is exactly thirteen ASCII digits.
pub fn is_isbn13(code: &str) -> bool {
    code.len() == 13 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Hyphenates a 13-digit ISBN as `3-1-3-5-1` for display and export.
///
/// Anything else is passed through untouched; checksums are not validated.
pub fn format_isbn(code: &str) -> String {
    if !is_isbn13(code) {
        return code.to_string();
    }

    let mut formatted = String::with_capacity(code.len() + ISBN13_GROUPS.len() - 1);
    let mut start = 0;
    for (index, len) in ISBN13_GROUPS.iter().enumerate() {
        if index > 0 {
            formatted.push('-');
        }
        formatted.push_str(&code[start..start + len]);
        start += len;
    }
    formatted
}
