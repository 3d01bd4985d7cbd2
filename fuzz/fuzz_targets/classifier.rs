#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use suspscan::ManualSuspendableClassifier;

fuzz_target!(|data: &[u8]| {
    let _ = ManualSuspendableClassifier::from_reader(Cursor::new(data), "fuzz");
});
