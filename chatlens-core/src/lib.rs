//! # chatlens-core
//!
//! Core library for chatlens - a WhatsApp chat export parser.
//!
//! This library provides:
//! - The transcript parsing pipeline (normalize, segment, infer, extract)
//! - Domain types for message records and parse statistics
//! - File loading with structural path validation
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Exports are mildly adversarial: two timestamp grammars, invisible
//! directionality marks, locale-dependent day/month ordering, and quoted
//! replies rendered as out-of-order messages. The pipeline recovers a
//! clean record sequence plus diagnostic counters in a single pass:
//!
//! - **Normalize:** strip BOM/direction marks and line terminators
//! - **Segment:** group lines into message blocks (header + continuations)
//! - **Infer:** decide day-first vs month-first once, from a sampled prefix
//! - **Extract:** parse each block, inherit missing years, fold quoted replies
//!
//! ## Example
//!
//! ```rust,no_run
//! use chatlens_core::{parse_chat_path, ImportOptions};
//! use std::path::Path;
//!
//! let result = parse_chat_path(Path::new("chat.txt"), &ImportOptions::default())
//!     .expect("failed to parse export");
//! println!("{} messages, {} ignored lines", result.records.len(), result.stats.ignored_lines);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use io::{parse_chat_path, parse_chat_reader};
pub use parse::TranscriptParser;
pub use types::*;

// Public modules
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod parse;
pub mod path;
pub mod types;
