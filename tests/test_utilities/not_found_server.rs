use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

const NOT_FOUND: &[u8] =
    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// Local HTTP server answering every request with 404
///
/// Stands in for both Maven Central and mvnrepository.com: every identity is
/// unknown and every usage listing is empty. The accept loop lives until the
/// test process exits.
pub struct NotFoundServer {
    url: String,
}

impl NotFoundServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                thread::spawn(move || respond(stream));
            }
        });

        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn respond(mut stream: TcpStream) {
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buffer[..n]),
        }
    }
    let _ = stream.write_all(NOT_FOUND);
}
