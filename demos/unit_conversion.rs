//! Normalizing units while reading, with a scaling policy and with a closure.
//!
//! Run with: RUST_LOG=debug cargo run --example unit_conversion

use pdtable::{
    from_str_with_options, to_string, ColumnValues, ParseOptions, PolicyError, ScalingPolicy,
};
use std::error::Error;

const INPUT: &str = "\
**farm_animals
your_farm;my_farm
species;legs;mass;height
text;int;kg;cm
chicken;2;3;40
horse;4;;180
";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let options = ParseOptions::new().with_source("farm.csv");

    // Multiplicative rules keyed on the declared unit
    let mut scaling = ScalingPolicy::new()
        .with_rule("kg", "g", 1000.0)
        .with_rule("cm", "m", 0.01);
    let tables = from_str_with_options(INPUT, &options, &mut scaling)?;
    println!("Scaled:\n{}", to_string(&tables[0])?);

    // Any closure works as a policy; this one counts the float columns it sees
    let mut float_columns = 0;
    let mut counting = |values: ColumnValues, unit: &str| -> Result<(ColumnValues, String), PolicyError> {
        if values.as_floats().is_some() {
            float_columns += 1;
        }
        Ok((values, unit.to_string()))
    };
    let tables = from_str_with_options(INPUT, &options, &mut counting)?;
    println!("Unchanged:\n{}", to_string(&tables[0])?);
    println!("float columns seen: {}", float_columns);

    // A strict policy refuses units it has no rule for
    let mut strict = ScalingPolicy::new().with_rule("kg", "g", 1000.0).strict();
    match from_str_with_options(INPUT, &options, &mut strict) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("strict policy: {}", err),
    }

    Ok(())
}
