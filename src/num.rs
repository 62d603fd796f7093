use core::str::FromStr;

// Permissive numeric parsing: leading whitespace is skipped, the longest numeric
// prefix is parsed, anything unparsable becomes the type's default (zero).

fn numeric_prefix(s: &str, allow_point: bool) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut seen_point = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if allow_point && !seen_point => {
                seen_point = true;
                end += 1;
            }
            _ => break,
        }
    }
    &s[..end]
}

pub(crate) fn lenient_int<T: FromStr + Default>(s: &str) -> T {
    numeric_prefix(s, false).parse().unwrap_or_default()
}

pub(crate) fn lenient_float(s: &str) -> f64 {
    numeric_prefix(s, true).parse().unwrap_or_default()
}
