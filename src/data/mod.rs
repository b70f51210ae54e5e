/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site/category indices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload predicates → chart series
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
