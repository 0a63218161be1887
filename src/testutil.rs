//! Test utilities: a one-shot HTTP server on a local port.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub struct TestServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl TestServer {
    /// Raw request (head and body) the server received.
    pub async fn request(self) -> String {
        self.handle.await.expect("test server task panicked")
    }
}

/// Accept one connection, answer with `status` and `body`, then stop.
pub async fn serve_once(status: &'static str, body: &'static str) -> TestServer {
    serve_raw(format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    ))
    .await
}

/// Like `serve_once`, but the body is cut short of its declared length.
pub async fn serve_truncated(status: &'static str) -> TestServer {
    serve_raw(format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial",
        status
    ))
    .await
}

async fn serve_raw(response: String) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        request
    });

    TestServer {
        url: format!("http://{}/", addr),
        handle,
    }
}

/// A URL on a port nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(head_end) = find_head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
