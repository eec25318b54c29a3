//! The array layout: a bare `return { ... }` list with one line per row.
//!
//! Run with: cargo run --example array_layout

use std::error::Error;
use tabletext::{from_str_value, table, to_string_array, to_string_with_options, Options};

fn main() -> Result<(), Box<dyn Error>> {
    let rows = vec![
        table!({ "id": 1, "name": "Ada", "role": "admin" }),
        table!({ "id": 2, "name": "Grace", "display name": "G. H." }),
        table!(42),
    ];

    let text = to_string_array(&rows)?;
    println!("{}", text);

    // Scalars come back as strings, mapping rows unchanged.
    let loaded = from_str_value(&text)?;
    println!("third row reloads as {:?}", loaded.get(3));

    // The same document through Options.
    let list = table!(["alpha", "beta"]);
    println!("{}", to_string_with_options(&list, Options::array().with_indent(2))?);

    Ok(())
}
