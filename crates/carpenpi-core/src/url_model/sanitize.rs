/// Linux NAME_MAX in bytes.
const NAME_MAX: usize = 255;

/// Makes `name` safe to use as a single path component.
///
/// Separators, NUL, control characters and whitespace become `_` (runs
/// collapsed); leading/trailing dots and underscores are trimmed; the result is
/// cut to 255 bytes on a char boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let unsafe_char = matches!(c, '/' | '\\' | '\0') || c.is_control() || c.is_whitespace();
        if unsafe_char {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_replaced() {
        assert_eq!(sanitize_filename("../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("a\\b.csv"), "a_b.csv");
    }

    #[test]
    fn whitespace_and_controls_collapse() {
        assert_eq!(sanitize_filename("  plot \t data\x00.csv "), "plot_data_.csv");
        assert_eq!(sanitize_filename("file___name.txt"), "file___name.txt");
    }

    #[test]
    fn long_names_truncated_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_filename(&long);
        assert!(out.len() <= NAME_MAX);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn dots_only_become_empty() {
        assert_eq!(sanitize_filename(".."), "");
    }
}
