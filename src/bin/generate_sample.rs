use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "sample_launches.csv";
const PARQUET_PATH: &str = "sample_launches.parquet";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform draw from [low, high).
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }
}

/// One booster generation: category label, payload envelope, success rate.
struct BoosterEra {
    category: &'static str,
    version_suffix: &'static str,
    first_flight: i64,
    last_flight: i64,
    payload_range: (f64, f64),
    success_rate: f64,
}

fn eras() -> Vec<BoosterEra> {
    vec![
        BoosterEra {
            category: "v1.0",
            version_suffix: "v1.0",
            first_flight: 1,
            last_flight: 6,
            payload_range: (0.0, 600.0),
            success_rate: 0.40,
        },
        BoosterEra {
            category: "v1.1",
            version_suffix: "v1.1",
            first_flight: 7,
            last_flight: 26,
            payload_range: (500.0, 4_000.0),
            success_rate: 0.55,
        },
        BoosterEra {
            category: "FT",
            version_suffix: "FT",
            first_flight: 27,
            last_flight: 62,
            payload_range: (1_500.0, 7_000.0),
            success_rate: 0.75,
        },
        BoosterEra {
            category: "B4",
            version_suffix: "B4",
            first_flight: 63,
            last_flight: 80,
            payload_range: (2_500.0, 9_600.0),
            success_rate: 0.85,
        },
        BoosterEra {
            category: "B5",
            version_suffix: "B5",
            first_flight: 81,
            last_flight: 120,
            payload_range: (2_000.0, 9_600.0),
            success_rate: 0.93,
        },
    ]
}

fn pick_site(rng: &mut SimpleRng) -> &'static str {
    // Roughly the historical split between the Florida pads and Vandenberg.
    let roll = rng.next_f64();
    if roll < 0.35 {
        "CCAFS LC-40"
    } else if roll < 0.55 {
        "CCAFS SLC-40"
    } else if roll < 0.80 {
        "KSC LC-39A"
    } else {
        "VAFB SLC-4E"
    }
}

struct SampleLaunch {
    flight_number: i64,
    site: &'static str,
    payload_mass_kg: f64,
    class: i64,
    booster_version: String,
    category: &'static str,
}

fn main() {
    let mut rng = SimpleRng::new(7);

    let mut launches: Vec<SampleLaunch> = Vec::new();
    for era in &eras() {
        for flight in era.first_flight..=era.last_flight {
            let (low, high) = era.payload_range;
            let payload = (rng.range(low, high) * 10.0).round() / 10.0;

            // Heavier payloads fail a little more often within an era.
            let success_p = era.success_rate - 0.08 * (payload / 10_000.0);
            let class = i64::from(rng.next_f64() < success_p);

            launches.push(SampleLaunch {
                flight_number: flight,
                site: pick_site(&mut rng),
                payload_mass_kg: payload,
                class,
                booster_version: format!("F9 {}  B{}", era.version_suffix, 1000 + flight),
                category: era.category,
            });
        }
    }

    write_csv(&launches);
    write_parquet(&launches);

    println!(
        "Wrote {} launch records to {CSV_PATH} and {PARQUET_PATH}",
        launches.len()
    );
}

fn write_csv(launches: &[SampleLaunch]) {
    let mut writer = csv::Writer::from_path(CSV_PATH).expect("Failed to create CSV file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");

    for launch in launches {
        writer
            .write_record([
                launch.flight_number.to_string(),
                launch.site.to_string(),
                launch.class.to_string(),
                format!("{:.1}", launch.payload_mass_kg),
                launch.booster_version.clone(),
                launch.category.to_string(),
            ])
            .expect("Failed to write CSV record");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(launches: &[SampleLaunch]) {
    let flight_array = Int64Array::from(
        launches.iter().map(|l| l.flight_number).collect::<Vec<_>>(),
    );
    let site_array =
        StringArray::from(launches.iter().map(|l| l.site).collect::<Vec<_>>());
    let class_array = Int64Array::from(launches.iter().map(|l| l.class).collect::<Vec<_>>());
    let payload_array = Float64Array::from(
        launches.iter().map(|l| l.payload_mass_kg).collect::<Vec<_>>(),
    );
    let version_array = StringArray::from(
        launches
            .iter()
            .map(|l| l.booster_version.as_str())
            .collect::<Vec<_>>(),
    );
    let category_array =
        StringArray::from(launches.iter().map(|l| l.category).collect::<Vec<_>>());

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
            Arc::new(flight_array),
            Arc::new(site_array),
            Arc::new(class_array),
            Arc::new(payload_array),
            Arc::new(version_array),
            Arc::new(category_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(PARQUET_PATH).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}
