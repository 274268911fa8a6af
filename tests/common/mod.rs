#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use repertoire::config::Config;

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

type Routes = Arc<Mutex<HashMap<String, (u16, String)>>>;

/// Minimal HTTP/1.1 server answering fixed bodies by path. Unknown paths get 404.
pub struct Stub {
    pub base: String,
    routes: Routes,
}

impl Stub {
    pub fn route(&self, path: &str, status: u16, body: impl Into<String>) {
        self.routes
            .lock()
            .expect("routes lock")
            .insert(path.to_string(), (status, body.into()));
    }
}

pub async fn serve() -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let base = format!("http://{}", listener.local_addr().expect("stub addr"));
    let routes: Routes = Arc::default();
    let shared = Arc::clone(&routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else {
                return;
            };
            let routes = Arc::clone(&shared);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&buf);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let found = routes.lock().expect("routes lock").get(&path).cloned();
                let (status, body) = found
                    .unwrap_or((404, "{\"message\":\"not found\"}".to_string()));
                let resp = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = sock.write_all(resp.as_bytes()).await;
                let _ = sock.shutdown().await;
            });
        }
    });

    Stub { base, routes }
}

pub fn config_for(stub: &Stub) -> Config {
    Config {
        openings_url: format!("{}/openings/{{category}}.tsv", stub.base),
        archives_url: format!("{}/pub/player/{{handle}}/games/archives", stub.base),
        ..Config::default()
    }
}

pub fn archive_path(handle: &str, month: &str) -> String {
    format!("/pub/player/{}/games/{}", handle, month)
}

pub fn archive_list(stub: &Stub, handle: &str, months: &[&str]) -> String {
    let urls: Vec<String> = months
        .iter()
        .map(|m| format!("\"{}{}\"", stub.base, archive_path(handle, m)))
        .collect();
    format!("{{\"archives\":[{}]}}", urls.join(","))
}
