#![no_main]

use elastic_integration_connection::{EndpointUri, normalize_hosts};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<String>, Option<bool>)| {
    let (raw_hosts, ssl_enabled) = input;
    let hosts: Vec<EndpointUri> = raw_hosts
        .iter()
        .filter_map(|host| EndpointUri::parse(host).ok())
        .collect();

    // 정규화 결과를 다시 정규화해도 같아야 한다
    if let Ok(normalized) = normalize_hosts(&hosts, ssl_enabled) {
        let again = normalize_hosts(&normalized, ssl_enabled);
        assert_eq!(again.ok(), Some(normalized));
    }
});
