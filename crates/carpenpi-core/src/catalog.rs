//! Built-in list of Data Carpentry data files mirrored when no `urls` are configured.

/// Ecology lesson datasets, in download order.
const DEFAULT_URLS: &[&str] = &[
    "https://ndownloader.figshare.com/files/2292169",
    "https://ndownloader.figshare.com/files/10717177",
    "https://ndownloader.figshare.com/files/3299483",
    "https://ndownloader.figshare.com/files/3299474",
    "https://ndownloader.figshare.com/files/2292172",
    "https://ndownloader.figshare.com/files/11502815",
];

/// Returns the built-in URL list in download order.
pub fn default_urls() -> Vec<String> {
    DEFAULT_URLS.iter().map(|s| s.to_string()).collect()
}
