//! The curation pipeline.
//!
//! Raw results enter at the section builder and pass through each stage in
//! turn:
//!
//! 1. [`classify`]: keep only URLs that look like articles
//! 2. [`normalize`]: canonical source domain, markup stripped
//! 3. [`dedupe`]: drop repeated titles and links
//! 4. [`score`]: stable rank by source reputation and metadata
//! 5. [`select`]: domain-diverse subset with a minimum-size backfill
//! 6. [`summarize`]: three fixed-shape summary lines per item
//!
//! [`section`] runs these stages for one category and [`digest`] combines
//! the finished sections into the per-date record. Every stage is pure
//! except collection, so a section can be rebuilt deterministically from
//! the same candidate pool.

pub mod classify;
pub mod dedupe;
pub mod digest;
pub mod normalize;
pub mod score;
pub mod section;
pub mod select;
pub mod summarize;
