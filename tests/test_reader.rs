use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use hostecho::http::reader::read_request;
use tokio::io::{AsyncRead, AsyncWriteExt, ReadBuf};

/// Fails every read.
struct BrokenStream;

impl AsyncRead for BrokenStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")))
    }
}

#[tokio::test]
async fn test_read_complete_request() {
    let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let raw = read_request(&mut input, 4096, None).await;

    assert_eq!(raw.as_bytes(), b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
    assert!(raw.is_complete());
}

#[tokio::test]
async fn test_read_stops_at_terminator_without_eof() {
    let (mut client, mut server) = tokio::io::duplex(64);

    client
        .write_all(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n")
        .await
        .unwrap();

    // The client stays open; the reader must return anyway
    let raw = tokio::time::timeout(
        Duration::from_secs(5),
        read_request(&mut server, 4096, None),
    )
    .await
    .expect("reader should stop at the header terminator");

    assert!(raw.is_complete());
    drop(client);
}

#[tokio::test]
async fn test_read_terminator_split_across_reads() {
    let (mut client, mut server) = tokio::io::duplex(64);

    let reader = tokio::spawn(async move { read_request(&mut server, 4096, None).await });

    client.write_all(b"GET / HTTP/1.1\r\nHost: a\r\n\r").await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    client.write_all(b"\n").await.unwrap();

    let raw = tokio::time::timeout(Duration::from_secs(5), reader)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(raw.as_bytes(), b"GET / HTTP/1.1\r\nHost: a\r\n\r\n");
    drop(client);
}

#[tokio::test]
async fn test_read_peer_closed_before_terminator() {
    let request: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let mut input = request;
    let raw = read_request(&mut input, 4096, None).await;

    assert_eq!(raw.as_bytes(), request);
    assert!(!raw.is_complete());
}

#[tokio::test]
async fn test_read_empty_connection() {
    let mut input: &[u8] = b"";
    let raw = read_request(&mut input, 4096, None).await;

    assert!(raw.is_empty());
}

#[tokio::test]
async fn test_read_stops_at_capacity() {
    let data = vec![b'a'; 10_000];
    let mut input: &[u8] = &data;
    let raw = read_request(&mut input, 4096, None).await;

    assert_eq!(raw.len(), 4095);
    assert!(!raw.is_complete());
}

#[tokio::test]
async fn test_read_small_capacity() {
    let mut input: &[u8] = b"GET / HTTP/1.1\r\n\r\n";
    let raw = read_request(&mut input, 4, None).await;

    assert_eq!(raw.as_bytes(), b"GET");
}

#[tokio::test]
async fn test_read_error_yields_empty_request() {
    let mut stream = BrokenStream;
    let raw = read_request(&mut stream, 4096, None).await;

    assert!(raw.is_empty());
}

#[tokio::test]
async fn test_read_deadline_returns_partial() {
    let (mut client, mut server) = tokio::io::duplex(64);
    client.write_all(b"GET / HTTP/1.1\r\nHost: slow").await.unwrap();

    let raw = tokio::time::timeout(
        Duration::from_secs(5),
        read_request(&mut server, 4096, Some(Duration::from_millis(50))),
    )
    .await
    .expect("deadline should end the read");

    assert_eq!(raw.as_bytes(), b"GET / HTTP/1.1\r\nHost: slow");
    drop(client);
}
