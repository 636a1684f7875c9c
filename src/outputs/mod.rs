//! Output generation modules for the dataset file and its card.
//!
//! This module contains submodules responsible for everything the pipeline
//! writes:
//!
//! # Submodules
//!
//! - [`jsonl`]: Append-only JSONL dataset writer with set-based deduplication
//! - [`card`]: Dataset card (YAML front matter + Markdown) uploaded as `README.md`
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! └── rvo_content.jsonl   # one record per line, append-only
//! ```

pub mod card;
pub mod jsonl;
