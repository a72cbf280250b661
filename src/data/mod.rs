/// Data layer: core types, loading, indexing and per-hospital roll-up.
///
/// Architecture:
/// ```text
///       .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse records → Vec<Row> (invalid rows dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PriceDataset  │  rows + code index (sorted codes, meta by code)
///   └──────────────┘
///        │  selected code
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group by hospital → medians, modal city/state
///   └───────────┘
/// ```

pub mod aggregate;
pub mod index;
pub mod loader;
pub mod model;
