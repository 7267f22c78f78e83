//! Output generation for the digest, the date index and Markdown.
//!
//! # Submodules
//!
//! - [`json`]: writes the [`Digest`](crate::models::Digest) for a date
//! - [`indexes`]: loads, updates and saves the date index
//! - [`markdown`]: renders the digest for reading
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── index.json             # date -> digest location, sorted by date
//! └── entries/
//!     └── 2024-05-01.json    # one digest per date
//!
//! markdown_output_dir/
//! └── 2024-05-01.md
//! ```

pub mod indexes;
pub mod json;
pub mod markdown;
