//! Fuzz target for config parsing.
//!
//! Goal: parsing and resolving a config should **never panic** on any input,
//! in either format. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pathlabel_settings::{ConfigFormat, load_config};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = load_config(text, ConfigFormat::Toml);
        let _ = load_config(text, ConfigFormat::Yaml);
    }
});
