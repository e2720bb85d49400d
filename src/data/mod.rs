/// Data layer: core types, loading, and Arrow conversion.
///
/// Architecture:
/// ```text
///   assets/iris.csv (bundled)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → RecordTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordTable  │  Vec<Record>, label set, optional row index
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  batch    │  row ranges → Arrow RecordBatch for printing
///   └──────────┘
/// ```

pub mod batch;
pub mod loader;
pub mod model;
