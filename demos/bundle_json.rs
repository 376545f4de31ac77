//! Collecting tables by name and rendering them as JSON.
//!
//! Run with: cargo run --example bundle_json

use pdtable::{read_bundle, IdentityPolicy, ParseOptions};
use std::error::Error;

const INPUT: &str = "\
**farm_animals
your_farm;my_farm
species;mass;alive
text;kg;onoff
chicken;3;1
horse;;0

**barns
my_farm
barn;capacity;built
text;int;date
north;40;1999-08-01
";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let bundle = read_bundle(INPUT, &ParseOptions::new(), &mut IdentityPolicy)?;
    println!("tables: {:?}", bundle.names().collect::<Vec<_>>());

    for table in bundle.for_destination("your_farm") {
        println!("for your_farm: {}", table.name());
    }

    let json = serde_json::to_string_pretty(&bundle["farm_animals"])?;
    println!("{}", json);

    Ok(())
}
