#![no_main]

use imap_sort_proto::{Capabilities, Response};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((_, response)) = Response::from_bytes(data) {
        let _ = Capabilities::from_response(&response);
    }
});
