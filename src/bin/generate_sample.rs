use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// (site, launches, success probability)
const SITES: [(&str, usize, f64); 4] = [
    ("CCAFS LC-40", 26, 0.27),
    ("VAFB SLC-4E", 10, 0.40),
    ("KSC LC-39A", 13, 0.77),
    ("CCAFS SLC-40", 7, 0.43),
];

/// (category, max payload kg)
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 700.0),
    ("v1.1", 4500.0),
    ("FT", 7000.0),
    ("B4", 9600.0),
    ("B5", 9600.0),
];

/// splitmix64, enough for reproducible sample rows.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct SampleLaunch {
    flight_number: i32,
    site: &'static str,
    class: i64,
    payload: f64,
    booster_version: String,
    category: &'static str,
}

fn generate(rng: &mut SampleRng) -> Vec<SampleLaunch> {
    let mut launches = Vec::new();
    let mut flight_number = 1;
    for &(site, count, success_rate) in &SITES {
        for _ in 0..count {
            let (category, max_payload) = BOOSTERS[(rng.next_u64() % BOOSTERS.len() as u64) as usize];
            // Round to 10 kg like the published manifests.
            let payload = (rng.next_f64() * max_payload / 10.0).round() * 10.0;
            launches.push(SampleLaunch {
                flight_number,
                site,
                class: i64::from(rng.next_f64() < success_rate),
                payload,
                booster_version: format!("F9 {category} B{}", 1000 + flight_number),
                category,
            });
            flight_number += 1;
        }
    }
    launches
}

fn write_csv(path: &str, launches: &[SampleLaunch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
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
            l.flight_number.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload),
            l.booster_version.clone(),
            l.category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[SampleLaunch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int32, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int32Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let launches = generate(&mut rng);

    write_csv("sample_launches.csv", &launches)?;
    write_parquet("sample_launches.parquet", &launches)?;

    println!(
        "Wrote {} launches to sample_launches.csv and sample_launches.parquet",
        launches.len()
    );
    Ok(())
}
