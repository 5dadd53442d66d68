/// Data layer: course types, loading, search and statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, coerce fields → CourseTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ CourseTable  │  immutable Vec<Course>
///   └─────────────┘
///        │
///        ├────────────────────┐
///        ▼                    ▼
///   ┌──────────┐        ┌──────────┐
///   │  search   │        │  stats    │  seven aggregates → Dashboard
///   └──────────┘        └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod search;
pub mod stats;
