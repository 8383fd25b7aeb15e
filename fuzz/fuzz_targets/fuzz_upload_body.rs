#![no_main]

use libfuzzer_sys::fuzz_target;
use upload_field::bytes::Bytes;
use upload_field::{RawRequest, UploadField};

fuzz_target!(|data: &[u8]| {
    // The first byte picks how much of the input becomes the boundary token.
    let (split, data) = match data.split_first() {
        Some((split, rest)) => ((*split as usize).min(rest.len()), rest),
        None => return,
    };
    let (boundary, body) = data.split_at(split);

    let req = RawRequest::new(Bytes::copy_from_slice(body)).with_header(
        "Content-Type",
        format!("multipart/form-data; boundary={}", String::from_utf8_lossy(boundary)),
    );

    let mut field = UploadField::new();
    if field.parse(&req) {
        assert_eq!(field.content_length(), field.bytes().len());
        assert!(field.bytes().len() <= body.len());
    } else {
        assert!(field.error().is_some());
        assert!(field.bytes().is_empty());
    }
});
