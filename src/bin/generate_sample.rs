use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.45),
    ("VAFB SLC-4E", 0.15),
    ("KSC LC-39A", 0.25),
    ("CCAFS SLC-40", 0.15),
];

/// Booster generations in flight order: (category, version prefix, first
/// flight, mean payload kg, payload spread, success probability).
const BOOSTERS: [(&str, &str, i64, f64, f64, f64); 5] = [
    ("v1.0", "F9 v1.0", 1, 300.0, 250.0, 0.2),
    ("v1.1", "F9 v1.1", 6, 2500.0, 1200.0, 0.35),
    ("FT", "F9 FT", 21, 5000.0, 1800.0, 0.8),
    ("B4", "F9 B4", 37, 4500.0, 2000.0, 0.7),
    ("B5", "F9 B5", 47, 6500.0, 2500.0, 0.9),
];

struct Launch {
    flight: i64,
    site: &'static str,
    class: i64,
    payload: f64,
    version: String,
    category: &'static str,
}

/// Normal sample via the Box-Muller transform.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn generate(n: i64, rng: &mut StdRng) -> Result<Vec<Launch>> {
    let site_weights = WeightedIndex::new(SITES.iter().map(|(_, w)| *w))
        .context("building site weights")?;

    let launches = (1..=n)
        .map(|flight| {
            let (category, prefix, _, mean, spread, p_success) = BOOSTERS
                .iter()
                .rev()
                .find(|b| flight >= b.2)
                .copied()
                .unwrap_or(BOOSTERS[0]);

            Launch {
                flight,
                site: SITES[site_weights.sample(rng)].0,
                class: i64::from(rng.gen_bool(p_success)),
                payload: (gauss(rng, mean, spread).max(0.0) * 10.0).round() / 10.0,
                version: format!("{prefix} B{:04}", 1000 + flight),
                category,
            }
        })
        .collect();
    Ok(launches)
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload),
            l.version.clone(),
            l.category.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let launches = generate(56, &mut rng)?;

    write_csv("sample_launches.csv", &launches)?;
    write_parquet("sample_launches.parquet", &launches)?;

    println!(
        "Wrote {} launches to sample_launches.csv and sample_launches.parquet",
        launches.len()
    );
    Ok(())
}
