//! Local filename for a downloaded URL.
//!
//! Prefers the server's `Content-Disposition` filename, then the last URL
//! path segment, and sanitizes the result for the local filesystem.

mod content_disposition;
mod path;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use path::{filename_from_url_path, percent_decode};
pub use sanitize::sanitize_filename;

/// Used when neither the header nor the URL yields a usable name.
pub const FALLBACK_FILENAME: &str = "download.bin";

/// Derives the name a download of `url` is saved under.
///
/// - `derive_filename("http://example.org/a.csv", None)` → `"a.csv"`
/// - `derive_filename("https://ndownloader.figshare.com/files/2292169", Some("attachment; filename=portal_data_joined.csv"))` → `"portal_data_joined.csv"`
pub fn derive_filename(url: &str, content_disposition: Option<&str>) -> String {
    content_disposition
        .and_then(parse_content_disposition_filename)
        .map(|name| sanitize_filename(&name))
        .filter(|name| usable(name))
        .or_else(|| {
            filename_from_url_path(url)
                .map(|name| sanitize_filename(&name))
                .filter(|name| usable(name))
        })
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// `n`-th alternative for `name`: 0 → `data.csv`, 1 → `data (1).csv`.
///
/// The counter goes before the last extension; a leading dot does not start one.
pub fn numbered_filename(name: &str, n: usize) -> String {
    if n == 0 {
        return name.to_string();
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], n, &name[dot..]),
        _ => format!("{} ({})", name, n),
    }
}

fn usable(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}
