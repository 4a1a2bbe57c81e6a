/// Data layer: core types, loading, filtering, and chart aggregation.
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
///   │ LaunchDataset │  Vec<LaunchRecord>, derived indices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │ ───▶ │ aggregate  │  site/payload predicates → chart rows
///   └──────────┘      └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
