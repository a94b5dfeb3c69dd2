//! `carpenpi urls` – list configured URLs.

use carpenpi_core::config::CarpenpiConfig;

pub fn run_urls(cfg: &CarpenpiConfig) {
    for url in &cfg.urls {
        println!("{url}");
    }
}
