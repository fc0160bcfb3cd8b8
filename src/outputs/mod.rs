//! Daily edition assembly and output.
//!
//! # Submodules
//!
//! - [`edition`]: Caps the ranked list into a [`DailyEdition`](crate::models::DailyEdition)
//!   and logs its headline stories
//! - [`json`]: Writes the edition to disk for the persistence and rendering collaborators
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── edition_2025-05-05.json
//! └── edition_2025-05-06.json
//! ```

pub mod edition;
pub mod json;
