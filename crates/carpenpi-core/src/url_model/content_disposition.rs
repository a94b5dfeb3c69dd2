use super::path::percent_decode;

/// Filename carried by a `Content-Disposition` header value, if any.
///
/// `filename*=UTF-8''…` (RFC 5987) wins over plain `filename=`, which may be
/// quoted (with `\"` escapes) or a bare token.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let mut plain = None;
    for param in header_value.split(';').skip(1) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                if let Some(name) = decode_ext_value(value).filter(|n| !n.is_empty()) {
                    return Some(name);
                }
            }
            "filename" => {
                let name = unquote(value);
                if !name.is_empty() {
                    plain = Some(name);
                }
            }
            _ => {}
        }
    }
    plain
}

/// `charset'lang'percent-encoded`; only UTF-8 (and its ASCII subset) is accepted.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?;
    let _lang = parts.next()?;
    let encoded = parts.next()?;
    if charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("us-ascii") {
        Some(percent_decode(encoded))
    } else {
        None
    }
}

fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    out
}
