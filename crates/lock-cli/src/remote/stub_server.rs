//! Minimal HTTP/1.1 server for driving the remote clients against real
//! sockets. Each canned reply answers one connection and closes it.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

pub(crate) struct Reply {
    status: u16,
    body: Vec<u8>,
}

pub(crate) fn reply(status: u16, body: impl Into<Vec<u8>>) -> Reply {
    Reply {
        status,
        body: body.into(),
    }
}

/// One request as the server received it.
pub(crate) struct Seen {
    pub line: String,
    headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Seen {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Answer `replies` in order on 127.0.0.1, one per connection. Returns the
/// base URL and a handle yielding the requests once every reply is sent.
pub(crate) fn serve(replies: Vec<Reply>) -> (String, JoinHandle<Vec<Seen>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let mut headers = Vec::new();
            loop {
                let mut raw = String::new();
                reader.read_line(&mut raw).unwrap();
                let raw = raw.trim_end();
                if raw.is_empty() {
                    break;
                }
                if let Some((k, v)) = raw.split_once(':') {
                    headers.push((k.trim().to_string(), v.trim().to_string()));
                }
            }
            let len = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .map(|(_, v)| v.parse::<usize>().unwrap())
                .unwrap_or(0);
            let mut body = vec![0; len];
            reader.read_exact(&mut body).unwrap();

            write!(
                stream,
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                reply.status,
                reply.body.len()
            )
            .unwrap();
            stream.write_all(&reply.body).unwrap();
            stream.flush().unwrap();

            seen.push(Seen {
                line: line.trim_end().to_string(),
                headers,
                body,
            });
        }
        seen
    });
    (base_url, handle)
}
