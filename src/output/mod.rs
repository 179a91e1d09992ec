//! Output formatters for indexing results.
//!
//! - Text for interactive use, with the delete prompt
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use mediadex::engine::Indexer;
//! use mediadex::error::ExitCode;
//! use mediadex::output::JsonOutput;
//! use mediadex::reporter::NullReporter;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let indexer = Indexer::open(Path::new("/photos"), Arc::new(NullReporter)).unwrap();
//! let (groups, summary) = indexer.run(Path::new("/photos")).unwrap();
//!
//! let output = JsonOutput::new(&groups, &summary, ExitCode::for_run(groups.len(), summary.errors));
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

pub use json::{JsonOutput, JsonOutputError};
pub use text::{write_delete_prompt, write_group, TextOutput};
