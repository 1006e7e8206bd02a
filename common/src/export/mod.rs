//! Export core modules shared by the CLI and desktop front ends.

#[cfg(feature = "excel")]
pub mod excel_core;
