use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdtable::{from_str, from_str_with_options, to_string, ParseOptions, ScalingPolicy, Table};

fn farm_table(rows: usize) -> Table {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let species: Vec<String> = (0..rows).map(|i| format!("animal_{}", i)).collect();
    let legs: Vec<i64> = (0..rows).map(|i| (i % 4) as i64 + 1).collect();
    let mass: Vec<Option<f64>> = (0..rows)
        .map(|i| if i % 7 == 0 { None } else { Some(i as f64 * 1.25) })
        .collect();
    let alive: Vec<bool> = (0..rows).map(|i| i % 3 != 0).collect();
    let born: Vec<NaiveDate> = (0..rows)
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();

    let mut table = Table::new("farm_animals")
        .unwrap()
        .with_destinations(["your_farm", "my_farm"]);
    table.add_column("species", species, None).unwrap();
    table.add_column("legs", legs, None).unwrap();
    table.add_column("mass", mass, Some("kg")).unwrap();
    table.add_column("alive", alive, None).unwrap();
    table.add_column("born", born, None).unwrap();
    table
}

fn benchmark_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    for size in [10, 100, 1000].iter() {
        let table = farm_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| to_string(black_box(table)))
        });
    }
    group.finish();
}

fn benchmark_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    for size in [10, 100, 1000].iter() {
        let text = to_string(&farm_table(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_read_with_scaling(c: &mut Criterion) {
    let text = to_string(&farm_table(1000)).unwrap();
    let options = ParseOptions::new();
    c.bench_function("read_with_scaling", |b| {
        b.iter(|| {
            let mut policy = ScalingPolicy::new().with_rule("kg", "g", 1000.0);
            from_str_with_options(black_box(&text), &options, &mut policy)
        })
    });
}

fn benchmark_many_small_blocks(c: &mut Criterion) {
    let block = to_string(&farm_table(5)).unwrap();
    let text = (0..200)
        .map(|i| block.replacen("farm_animals", &format!("farm_{}", i), 1))
        .collect::<String>();
    c.bench_function("read_200_blocks", |b| b.iter(|| from_str(black_box(&text))));
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let table = farm_table(100);
    c.bench_function("roundtrip", |b| {
        b.iter(|| {
            let text = to_string(black_box(&table)).unwrap();
            let tables = from_str(&text).unwrap();
            black_box(tables)
        })
    });
}

criterion_group!(
    benches,
    benchmark_write,
    benchmark_read,
    benchmark_read_with_scaling,
    benchmark_many_small_blocks,
    benchmark_roundtrip
);
criterion_main!(benches);
