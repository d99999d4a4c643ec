//! Mock JSON-RPC endpoint for integration tests.

use serde_json::{json, Value};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Chain ID reported by the mock (Anvil default).
pub const MOCK_CHAIN_ID: u64 = 31337;

/// Highest block the mock knows about.
pub const MOCK_HEAD: u64 = 16;

/// Behaviour of the mock chain.
#[derive(Debug, Clone)]
pub struct MockChain {
    /// Lowercase hex addresses that have contract code.
    pub deployed: HashSet<String>,
    /// Balance returned for every account, hex encoded.
    pub balance: String,
    /// Never answer `eth_getBlockByNumber`.
    pub stall_headers: bool,
    /// Never answer `eth_getCode`.
    pub stall_code: bool,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            deployed: HashSet::new(),
            balance: "0xde0b6b3a7640000".to_string(),
            stall_headers: false,
            stall_code: false,
        }
    }
}

impl MockChain {
    pub fn with_contract(mut self, address: alloy::primitives::Address) -> Self {
        self.deployed.insert(address.to_string().to_lowercase());
        self
    }
}

/// Start the mock on an ephemeral port and return its URL.
pub async fn start_mock_rpc(chain: MockChain) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let chain = Arc::new(chain);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let chain = chain.clone();
                    tokio::spawn(async move {
                        serve(socket, chain).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{}", addr)
}

async fn serve(mut socket: TcpStream, chain: Arc<MockChain>) {
    let Some(body) = read_request(&mut socket).await else {
        return;
    };
    let Ok(request) = serde_json::from_str::<Value>(&body) else {
        return;
    };

    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    let params = &request["params"];

    let stalled = match method {
        "eth_getBlockByNumber" => chain.stall_headers,
        "eth_getCode" => chain.stall_code,
        _ => false,
    };
    if stalled {
        tokio::time::sleep(Duration::from_secs(60)).await;
        return;
    }

    let response = match method {
        "eth_chainId" => json!({"jsonrpc": "2.0", "id": id, "result": format!("{:#x}", MOCK_CHAIN_ID)}),
        "eth_getCode" => {
            let address = params[0].as_str().unwrap_or_default().to_lowercase();
            let code = if chain.deployed.contains(&address) {
                "0x6080604052348015600f57600080fd5b50"
            } else {
                "0x"
            };
            json!({"jsonrpc": "2.0", "id": id, "result": code})
        }
        "eth_getBalance" => json!({"jsonrpc": "2.0", "id": id, "result": chain.balance}),
        "eth_getBlockByNumber" => {
            let number = match params[0].as_str().unwrap_or("latest") {
                "latest" | "safe" | "finalized" | "pending" => Some(MOCK_HEAD),
                "earliest" => Some(0),
                hex => u64::from_str_radix(hex.trim_start_matches("0x"), 16).ok(),
            };
            let result = match number {
                Some(n) if n <= MOCK_HEAD => block_json(n),
                _ => Value::Null,
            };
            json!({"jsonrpc": "2.0", "id": id, "result": result})
        }
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": format!("method {} not found", method)}
        }),
    };

    let payload = response.to_string();
    let http = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        payload
    );
    let _ = socket.write_all(http.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = pos + 4;
            while buf.len() < start + len {
                let n = socket.read(&mut chunk).await.ok()?;
                if n == 0 {
                    return None;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            return Some(String::from_utf8_lossy(&buf[start..start + len]).into_owned());
        }

        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn hash(n: u64, salt: u8) -> String {
    format!("0x{:02x}{:062x}", salt, n)
}

fn block_json(n: u64) -> Value {
    json!({
        "hash": hash(n, 0xb1),
        "parentHash": hash(n.saturating_sub(1), 0xb1),
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "miner": "0x0000000000000000000000000000000000000000",
        "stateRoot": hash(n, 0x5a),
        "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "difficulty": "0x0",
        "number": format!("{:#x}", n),
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x0",
        "timestamp": format!("{:#x}", 1_700_000_000u64 + n * 12),
        "extraData": "0x",
        "mixHash": hash(n, 0x3e),
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x3b9aca00",
        "totalDifficulty": "0x0",
        "size": "0x220",
        "uncles": [],
        "transactions": []
    })
}
