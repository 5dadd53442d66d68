//! Course browser: keyword search and a statistics dashboard over a table
//! of online course listings.
//!
//! The [`data`] layer is plain Rust with no UI dependency: load a
//! [`data::model::CourseTable`] with [`data::loader::load_file`], then query
//! it with [`data::search`] or summarise it with [`data::stats::Dashboard`].
//! The remaining modules make up the egui viewer.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
