/// Data layer: core types, loading, filtering and statistics.
///
/// Architecture:
/// ```text
///  .xml (VOTable) / .csv / .parquet        top_24_planets.csv
///        │                                        │
///        ▼                                        ▼
///   ┌──────────┐                          ┌──────────────┐
///   │  loader   │  parse file → Catalog   │    loader     │  → Vec<String>
///   └──────────┘                          └──────────────┘
///        │                                        │
///        └──────────────────┬─────────────────────┘
///                           ▼
///                     ┌──────────┐
///                     │  filter   │  name membership → FilteredTable (1..N)
///                     └──────────┘
///                           │
///                           ▼
///                     ┌──────────┐
///                     │  summary  │  min/max/median/mean/std per column
///                     └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
pub mod votable;
