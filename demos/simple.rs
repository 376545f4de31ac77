//! Building a table, writing it as a block and reading it back.
//!
//! Run with: cargo run --example simple

use pdtable::{from_str, table, to_string};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let places = table!("foo" {
        "place": ["home", "work", "beach"],
        "distance" ("km"): [0.0, 1.0, 2.0],
    })?;

    let text = to_string(&places)?;
    println!("Block output:\n{}", text);

    let tables = from_str(&text)?;
    assert_eq!(tables, vec![places]);
    println!("✓ Round-trip successful");

    for column in tables[0].columns() {
        println!(
            "{:<10} {:<6} unit={}",
            column.name(),
            column.column_type().name(),
            column.unit()
        );
    }

    Ok(())
}
