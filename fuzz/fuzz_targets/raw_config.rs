#![no_main]

use std::path::Path;

use elastic_integration_connection::{ConnectionValidator, PathProbe, SystemTrust};
use elastic_integration_core::config::IntegrationConfig;
use libfuzzer_sys::fuzz_target;

struct AllowAll;

impl PathProbe for AllowAll {
    fn is_readable(&self, _: &Path) -> bool {
        true
    }
    fn is_writable(&self, _: &Path) -> bool {
        false
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(toml_str) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = IntegrationConfig::parse(toml_str) else {
        return;
    };

    let validator = ConnectionValidator::builder()
        .path_probe(AllowAll)
        .system_trust(SystemTrust::Available("/etc/ssl/cert.pem".into()))
        .build();
    let _ = validator.validate(&config.elastic_integration);
});
