/// Data layer: core types, loading, and queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet / https://…
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, min/max payload, sites
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  summarize (pie) / correlate (scatter)
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod query;
