use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use exoplanet_survey::data::model::{NumericColumn, PlanetRecord, NAME_COLUMN};

const PLANETS: [&str; 30] = [
    "Proxima Cen b", "Ross 128 b", "GJ 273 b", "Wolf 1061 c", "GJ 667 C c",
    "Teegarden's Star b", "TRAPPIST-1 d", "TRAPPIST-1 e", "TRAPPIST-1 f", "TRAPPIST-1 g",
    "LHS 1140 b", "K2-18 b", "TOI-700 d", "TOI-700 e", "Kepler-442 b",
    "Kepler-62 e", "Kepler-62 f", "Kepler-186 f", "Kepler-452 b", "Kepler-1649 c",
    "Kepler-296 e", "Kepler-1229 b", "Kepler-61 b", "Kepler-22 b", "HD 40307 g",
    "GJ 1061 d", "GJ 357 d", "LP 890-9 c", "Gliese 12 b", "Kepler-1652 b",
];

/// Planets left out of the target list.
const NOT_TARGETED: [usize; 6] = [2, 9, 13, 21, 25, 28];

/// Plausible (low, high) range per column for temperate rocky planets.
const RANGES: [(NumericColumn, f64, f64); 13] = [
    (NumericColumn::OrbitalPeriod, 1.0, 400.0),
    (NumericColumn::SemiMajorAxis, 0.01, 1.5),
    (NumericColumn::PlanetRadius, 0.7, 2.5),
    (NumericColumn::PlanetMass, 0.3, 10.0),
    (NumericColumn::Eccentricity, 0.0, 0.3),
    (NumericColumn::Insolation, 0.2, 2.0),
    (NumericColumn::EquilibriumTemp, 180.0, 320.0),
    (NumericColumn::StellarTemp, 2500.0, 6000.0),
    (NumericColumn::StellarRadius, 0.1, 1.1),
    (NumericColumn::StellarMass, 0.08, 1.1),
    (NumericColumn::StellarLogG, 4.3, 5.3),
    (NumericColumn::Distance, 1.3, 700.0),
    (NumericColumn::GaiaMagnitude, 5.0, 17.0),
];

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn generate_planets(rng: &mut SimpleRng) -> Vec<PlanetRecord> {
    PLANETS
        .iter()
        .map(|&name| {
            let mut record = PlanetRecord::named(name);
            for &(col, lo, hi) in &RANGES {
                let value = rng.uniform(lo, hi);
                // Roughly one value in eight is missing, as in the archive.
                let missing = rng.next_f64() < 0.125;
                record.set(col, (!missing).then_some((value * 1000.0).round() / 1000.0));
            }
            record
        })
        .collect()
}

fn write_votable(path: &str, planets: &[PlanetRecord]) -> Result<()> {
    let file = BufWriter::new(File::create(path).context("creating VOTable file")?);
    let mut w = Writer::new_with_indent(file, b' ', 2);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.write_event(Event::Start(BytesStart::new("VOTABLE").with_attributes([
        ("version", "1.4"),
        ("xmlns", "http://www.ivoa.net/xml/VOTable/v1.3"),
    ])))?;
    w.write_event(Event::Start(
        BytesStart::new("RESOURCE").with_attributes([("type", "results")]),
    ))?;
    w.write_event(Event::Start(BytesStart::new("TABLE")))?;

    w.write_event(Event::Empty(BytesStart::new("FIELD").with_attributes([
        ("name", NAME_COLUMN),
        ("datatype", "char"),
        ("arraysize", "*"),
    ])))?;
    for col in NumericColumn::ALL {
        w.write_event(Event::Empty(BytesStart::new("FIELD").with_attributes([
            ("name", col.name()),
            ("datatype", "double"),
        ])))?;
    }

    w.write_event(Event::Start(BytesStart::new("DATA")))?;
    w.write_event(Event::Start(BytesStart::new("TABLEDATA")))?;
    for planet in planets {
        w.write_event(Event::Start(BytesStart::new("TR")))?;
        let name = planet.pl_name.clone().unwrap_or_default();
        let cells = std::iter::once(name).chain(
            NumericColumn::ALL
                .iter()
                .map(|&col| planet.value(col).map(|v| v.to_string()).unwrap_or_default()),
        );
        for cell in cells {
            if cell.is_empty() {
                w.write_event(Event::Empty(BytesStart::new("TD")))?;
            } else {
                w.write_event(Event::Start(BytesStart::new("TD")))?;
                w.write_event(Event::Text(BytesText::new(&cell)))?;
                w.write_event(Event::End(BytesEnd::new("TD")))?;
            }
        }
        w.write_event(Event::End(BytesEnd::new("TR")))?;
    }
    for tag in ["TABLEDATA", "DATA", "TABLE", "RESOURCE", "VOTABLE"] {
        w.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}

fn write_parquet(path: &str, planets: &[PlanetRecord]) -> Result<()> {
    let mut fields = vec![Field::new(NAME_COLUMN, DataType::Utf8, true)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(
        planets.iter().map(|p| p.pl_name.as_deref()).collect::<Vec<_>>(),
    ))];
    for col in NumericColumn::ALL {
        fields.push(Field::new(col.name(), DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(
            planets.iter().map(|p| p.value(col)).collect::<Vec<_>>(),
        )));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_targets(path: &str) -> Result<usize> {
    let targets: Vec<&str> = PLANETS
        .iter()
        .enumerate()
        .filter(|(i, _)| !NOT_TARGETED.contains(i))
        .map(|(_, name)| *name)
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context("creating target list")?;
    for row in targets.chunks(6) {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(targets.len())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let planets = generate_planets(&mut rng);

    write_votable("exoplanet_data.xml", &planets)?;
    write_parquet("exoplanet_data.parquet", &planets)?;
    let n_targets = write_targets("top_24_planets.csv")?;

    println!(
        "Wrote {} planets to exoplanet_data.xml and exoplanet_data.parquet, {} targets to top_24_planets.csv",
        planets.len(),
        n_targets
    );
    Ok(())
}
