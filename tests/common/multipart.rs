//! Multipart body construction

pub const BOUNDARY: &str = "----wall-test-boundary";

/// `(content-type header, body)` for a form with one file field
pub fn file_form(file_name: &str, content_type: &str, contents: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            file_name, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// A form with a text field and no file
pub fn text_form(name: &str, value: &str) -> (String, Vec<u8>) {
    let body = format!(
        "--{0}\r\nContent-Disposition: form-data; name=\"{1}\"\r\n\r\n{2}\r\n--{0}--\r\n",
        BOUNDARY, name, value
    );
    (format!("multipart/form-data; boundary={}", BOUNDARY), body.into_bytes())
}
