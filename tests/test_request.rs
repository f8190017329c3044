use hostecho::http::request::{HOST_CAPACITY, HeaderLine, ParsedRequest};

#[test]
fn test_request_header_retrieval() {
    let req = ParsedRequest::new(vec![
        HeaderLine::new("Host", "example.com"),
        HeaderLine::new("Content-Type", "application/json"),
    ]);

    assert_eq!(req.header("Host"), Some(&b"example.com"[..]));
    assert_eq!(req.header("Content-Type"), Some(&b"application/json"[..]));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_host_found() {
    let req = ParsedRequest::new(vec![
        HeaderLine::new("Accept", "*/*"),
        HeaderLine::new("Host", "hellofc.example.com"),
    ]);

    assert_eq!(req.host(), Some(&b"hellofc.example.com"[..]));
}

#[test]
fn test_host_missing() {
    let req = ParsedRequest::new(vec![HeaderLine::new("Accept", "*/*")]);
    assert_eq!(req.host(), None);
}

#[test]
fn test_host_is_case_sensitive() {
    let req = ParsedRequest::new(vec![HeaderLine::new("host", "example.com")]);
    assert_eq!(req.host(), None);
}

#[test]
fn test_host_requires_exact_name() {
    let req = ParsedRequest::new(vec![
        HeaderLine::new("X-Forwarded-Host", "hellofc.example.com"),
        HeaderLine::new("Hostname", "helloqemu.example.com"),
    ]);
    assert_eq!(req.host(), None);
}

#[test]
fn test_host_first_wins() {
    let req = ParsedRequest::new(vec![
        HeaderLine::new("Host", "first.example"),
        HeaderLine::new("Host", "second.example"),
    ]);
    assert_eq!(req.host(), Some(&b"first.example"[..]));
}

#[test]
fn test_host_at_limit() {
    let longest = "a".repeat(HOST_CAPACITY - 1);
    let req = ParsedRequest::new(vec![HeaderLine::new("Host", longest.clone())]);
    assert_eq!(req.host(), Some(longest.as_bytes()));
}

#[test]
fn test_host_oversized_is_not_found() {
    let too_long = format!("hellofc{}", "a".repeat(HOST_CAPACITY));
    let req = ParsedRequest::new(vec![HeaderLine::new("Host", too_long)]);
    assert_eq!(req.host(), None);
}

#[test]
fn test_host_empty_value() {
    let req = ParsedRequest::new(vec![HeaderLine::new("Host", "")]);
    assert_eq!(req.host(), Some(&b""[..]));
}

#[test]
fn test_host_length_counts_raw_bytes() {
    // 107 raw bytes, none of them valid UTF-8 past the prefix
    let mut host = b"hellofc".to_vec();
    host.extend(std::iter::repeat_n(0xffu8, 100));
    let req = ParsedRequest::new(vec![HeaderLine::new("Host", host.clone())]);

    assert_eq!(req.host(), Some(host.as_slice()));
}
