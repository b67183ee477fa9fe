//! Canned JSON-RPC answers served by a mockito server.

use mockito::{Matcher, Mock, Request, Server};
use serde_json::{json, Value};

/// Answers every `method` call with `result`, echoing the request id.
pub async fn answer(server: &mut Server, method: &str, result: Value) -> Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": method })))
        .with_header("content-type", "application/json")
        .with_body_from_request(move |request: &Request| {
            let id = request
                .body()
                .ok()
                .and_then(|body| serde_json::from_slice::<Value>(body).ok())
                .and_then(|body| body.get("id").cloned())
                .unwrap_or(json!(0));
            json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string().into_bytes()
        })
        .create_async()
        .await
}

/// A mined receipt for `tx_hash` with the given status (`"0x1"` or `"0x0"`).
pub fn receipt(tx_hash: &str, status: &str) -> Value {
    json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "ab".repeat(32)),
        "blockNumber": "0x10",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x2d7eb0e8802d3a530e298a1f94ce176ad6b3ab43",
        "cumulativeGasUsed": "0xb411",
        "gasUsed": "0xb411",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "type": "0x2",
        "status": status
    })
}
