//! Reading blocks from a padded spreadsheet export, skipping unrelated content.
//!
//! Run with: RUST_LOG=debug cargo run --example spreadsheet_export

use pdtable::{read_tables, IdentityPolicy, ParseOptions};
use std::error::Error;

const EXPORT: &str = "\
Farm inventory;;;;
exported 2020-05-17;;;;
;;;;
**farm_animals;;;;
your_farm my_farm farms_galore;;;;
species;  num;  flt;   log;  born
text;     -;    kg;    onoff; date
chicken;  2;    3;     1;    2019-04-01
pig;      4;    39;    0;    2018-11-23
cow;      4;    200;   1;    2015-06-30
unicorn;  4;    NaN;   0;    2000-01-01
;;;;
***include;;;;
other_farms.csv;;;;
;;;;
**barns;;;;
my_farm;;;;
barn;capacity;;;
text;int;;;
north;40;;;
south;25;;;
";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let options = ParseOptions::lenient().with_source("inventory.csv");
    let mut policy = IdentityPolicy;
    let mut reader = read_tables(EXPORT.lines(), &options, &mut policy);

    for table in reader.by_ref() {
        let table = table?;
        println!(
            "{} from {}: {} rows x {} columns, destinations {:?}",
            table.name(),
            table.origin(),
            table.row_count(),
            table.column_count(),
            table.destinations()
        );
        for row in 0..table.row_count() {
            if let Some(values) = table.row(row) {
                let cells: Vec<String> = values.iter().map(ToString::to_string).collect();
                println!("  {}", cells.join(" | "));
            }
        }
    }
    println!("read {} lines", reader.line_number());

    Ok(())
}
