use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// NumericColumn – the physical quantities carried by every catalog row
// ---------------------------------------------------------------------------

/// The numeric catalog columns used by the survey, named as in the
/// NASA Exoplanet Archive `ps` / `pscomppars` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericColumn {
    OrbitalPeriod,
    SemiMajorAxis,
    PlanetRadius,
    PlanetMass,
    Eccentricity,
    Insolation,
    EquilibriumTemp,
    StellarTemp,
    StellarRadius,
    StellarMass,
    StellarLogG,
    Distance,
    GaiaMagnitude,
}

impl NumericColumn {
    /// All columns in catalog order.
    pub const ALL: [NumericColumn; 13] = [
        NumericColumn::OrbitalPeriod,
        NumericColumn::SemiMajorAxis,
        NumericColumn::PlanetRadius,
        NumericColumn::PlanetMass,
        NumericColumn::Eccentricity,
        NumericColumn::Insolation,
        NumericColumn::EquilibriumTemp,
        NumericColumn::StellarTemp,
        NumericColumn::StellarRadius,
        NumericColumn::StellarMass,
        NumericColumn::StellarLogG,
        NumericColumn::Distance,
        NumericColumn::GaiaMagnitude,
    ];

    /// Column name as it appears in the source table.
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::OrbitalPeriod => "pl_orbper",
            NumericColumn::SemiMajorAxis => "pl_orbsmax",
            NumericColumn::PlanetRadius => "pl_rade",
            NumericColumn::PlanetMass => "pl_bmasse",
            NumericColumn::Eccentricity => "pl_orbeccen",
            NumericColumn::Insolation => "pl_insol",
            NumericColumn::EquilibriumTemp => "pl_eqt",
            NumericColumn::StellarTemp => "st_teff",
            NumericColumn::StellarRadius => "st_rad",
            NumericColumn::StellarMass => "st_mass",
            NumericColumn::StellarLogG => "st_logg",
            NumericColumn::Distance => "sy_dist",
            NumericColumn::GaiaMagnitude => "sy_gaiamag",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the planet identifier column.
pub const NAME_COLUMN: &str = "pl_name";

// ---------------------------------------------------------------------------
// PlanetRecord – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog row. Every field may be absent in the source table.
///
/// Field names match the archive column names so CSV exports deserialize
/// directly into this type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlanetRecord {
    pub pl_name: Option<String>,
    pub pl_orbper: Option<f64>,
    pub pl_orbsmax: Option<f64>,
    pub pl_rade: Option<f64>,
    pub pl_bmasse: Option<f64>,
    pub pl_orbeccen: Option<f64>,
    pub pl_insol: Option<f64>,
    pub pl_eqt: Option<f64>,
    pub st_teff: Option<f64>,
    pub st_rad: Option<f64>,
    pub st_mass: Option<f64>,
    pub st_logg: Option<f64>,
    pub sy_dist: Option<f64>,
    pub sy_gaiamag: Option<f64>,
}

impl PlanetRecord {
    /// A record with the given name and no measurements.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            pl_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Read a numeric column.
    pub fn value(&self, column: NumericColumn) -> Option<f64> {
        *self.slot(column)
    }

    /// Write a numeric column. NaN is stored as a missing value.
    pub fn set(&mut self, column: NumericColumn, value: Option<f64>) {
        *self.slot_mut(column) = value.filter(|v| !v.is_nan());
    }

    /// Builder-style variant of [`PlanetRecord::set`].
    pub fn with(mut self, column: NumericColumn, value: f64) -> Self {
        self.set(column, Some(value));
        self
    }

    fn slot(&self, column: NumericColumn) -> &Option<f64> {
        match column {
            NumericColumn::OrbitalPeriod => &self.pl_orbper,
            NumericColumn::SemiMajorAxis => &self.pl_orbsmax,
            NumericColumn::PlanetRadius => &self.pl_rade,
            NumericColumn::PlanetMass => &self.pl_bmasse,
            NumericColumn::Eccentricity => &self.pl_orbeccen,
            NumericColumn::Insolation => &self.pl_insol,
            NumericColumn::EquilibriumTemp => &self.pl_eqt,
            NumericColumn::StellarTemp => &self.st_teff,
            NumericColumn::StellarRadius => &self.st_rad,
            NumericColumn::StellarMass => &self.st_mass,
            NumericColumn::StellarLogG => &self.st_logg,
            NumericColumn::Distance => &self.sy_dist,
            NumericColumn::GaiaMagnitude => &self.sy_gaiamag,
        }
    }

    fn slot_mut(&mut self, column: NumericColumn) -> &mut Option<f64> {
        match column {
            NumericColumn::OrbitalPeriod => &mut self.pl_orbper,
            NumericColumn::SemiMajorAxis => &mut self.pl_orbsmax,
            NumericColumn::PlanetRadius => &mut self.pl_rade,
            NumericColumn::PlanetMass => &mut self.pl_bmasse,
            NumericColumn::Eccentricity => &mut self.pl_orbeccen,
            NumericColumn::Insolation => &mut self.pl_insol,
            NumericColumn::EquilibriumTemp => &mut self.pl_eqt,
            NumericColumn::StellarTemp => &mut self.st_teff,
            NumericColumn::StellarRadius => &mut self.st_rad,
            NumericColumn::StellarMass => &mut self.st_mass,
            NumericColumn::StellarLogG => &mut self.st_logg,
            NumericColumn::Distance => &mut self.sy_dist,
            NumericColumn::GaiaMagnitude => &mut self.sy_gaiamag,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed catalog, rows in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub records: Vec<PlanetRecord>,
}

impl Catalog {
    pub fn new(records: Vec<PlanetRecord>) -> Self {
        Self { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilteredTable – catalog rows restricted to the target names
// ---------------------------------------------------------------------------

/// A filtered row together with its 1-based position in the filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRecord {
    pub index: usize,
    pub record: PlanetRecord,
}

/// Catalog rows restricted to a name set. Indices always run `1..=len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredTable {
    rows: Vec<IndexedRecord>,
}

impl FilteredTable {
    /// Assign a fresh contiguous 1-based index to `records`, keeping their order.
    pub fn reindexed(records: Vec<PlanetRecord>) -> Self {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| IndexedRecord { index: i + 1, record })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[IndexedRecord] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &PlanetRecord> {
        self.rows.iter().map(|r| &r.record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-missing values of `column`, in row order.
    pub fn column_values(&self, column: NumericColumn) -> Vec<f64> {
        self.records().filter_map(|r| r.value(column)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_are_unique_and_in_catalog_order() {
        let names: Vec<&str> = NumericColumn::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.first(), Some(&"pl_orbper"));
        assert_eq!(names.last(), Some(&"sy_gaiamag"));
        let mut dedup = names.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 13);
    }

    #[test]
    fn set_and_read_every_column() {
        let mut rec = PlanetRecord::named("HD 40307 g");
        for (i, col) in NumericColumn::ALL.iter().enumerate() {
            rec.set(*col, Some(i as f64));
        }
        for (i, col) in NumericColumn::ALL.iter().enumerate() {
            assert_eq!(rec.value(*col), Some(i as f64));
        }
        assert_eq!(rec.sy_dist, Some(11.0));
    }

    #[test]
    fn nan_is_stored_as_missing() {
        let mut rec = PlanetRecord::default();
        rec.set(NumericColumn::Distance, Some(f64::NAN));
        assert_eq!(rec.value(NumericColumn::Distance), None);
    }

    #[test]
    fn reindex_starts_at_one() {
        let table = FilteredTable::reindexed(vec![
            PlanetRecord::named("a"),
            PlanetRecord::named("b"),
            PlanetRecord::named("c"),
        ]);
        let idx: Vec<usize> = table.rows().iter().map(|r| r.index).collect();
        assert_eq!(idx, vec![1, 2, 3]);
    }

    #[test]
    fn column_values_skip_missing() {
        let table = FilteredTable::reindexed(vec![
            PlanetRecord::named("a").with(NumericColumn::PlanetRadius, 1.5),
            PlanetRecord::named("b"),
            PlanetRecord::named("c").with(NumericColumn::PlanetRadius, 0.9),
        ]);
        assert_eq!(table.column_values(NumericColumn::PlanetRadius), vec![1.5, 0.9]);
        assert!(table.column_values(NumericColumn::EquilibriumTemp).is_empty());
    }
}
