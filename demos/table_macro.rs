//! Building values with the `table!` macro and inspecting them.
//!
//! Run with: cargo run --example table_macro

use std::error::Error;
use tabletext::{table, to_string, Value};

fn main() -> Result<(), Box<dyn Error>> {
    let config = table!({
        "server": {
            "host": "localhost",
            "port": 8080,
            "tls": false
        },
        "users": ["alice", "bob"],
        1: "first positional entry"
    });

    if let Some(server) = config.get("server") {
        println!("host: {}", server.get("host").unwrap_or(&Value::Nil));
        println!("port: {:?}", server.get("port").and_then(Value::as_i64));
    }
    println!("second user: {:?}", config.get("users").and_then(|u| u.get(2)));

    println!("\n{}", to_string(&config)?);
    Ok(())
}
