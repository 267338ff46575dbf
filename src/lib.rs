//! # posterior-extract
//!
//! Streaming column projection for MCMC posterior sample files.
//!
//! Stan and similar samplers write one CSV row per iteration, often with
//! thousands of columns and millions of rows, interleaved with `#` comment
//! lines. This crate picks columns by testing the header of the first file
//! against a [`HeaderMatcher`] and then streams every file's rows, writing
//! only the selected fields.
//!
//! ## Overview
//!
//! - **[`ColumnSet`]**: growable bit set of selected column positions
//! - **[`LineSource`]**: per-file reader that hides comment lines
//! - **[`RowTokenizer`]**: zero-copy comma splitter
//! - **[`OutputSink`]**: fixed-size output buffer written in full chunks
//! - **[`extract`]**: the run itself, header selection then row streaming
//!
//! Fields are plain comma-separated bytes; quoting is not understood.
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use posterior_extract::{
//!     ColumnSet, ExactMatcher, ExtractOptions, LineSource, OutputSink, extract,
//! };
//!
//! let csv = "# comment\niter,alpha,beta,sigma\n1,0.5,1.2,0.3\n";
//! let mut inputs = vec![LineSource::new(Cursor::new(csv.as_bytes()), "chain_1.csv")];
//! let matcher = ExactMatcher::new(&["alpha", "beta"]).unwrap();
//! let mut columns = ColumnSet::default();
//! let mut sink = OutputSink::with_capacity(Vec::new(), 1024).unwrap();
//!
//! extract(&mut inputs, &matcher, &mut columns, &mut sink, &ExtractOptions::default()).unwrap();
//! assert_eq!(sink.into_inner(), b"alpha,beta\n0.5,1.2\n");
//! ```

pub mod cli;
pub mod column_set;
pub mod config;
pub mod error;
pub mod line_source;
pub mod matcher;
pub mod pipeline;
pub mod sink;
pub mod tokenizer;

pub use column_set::ColumnSet;
pub use config::{DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_LINES, ExtractOptions};
pub use error::ExtractError;
pub use line_source::{LineSource, open_input, open_inputs};
pub use matcher::{ExactMatcher, HeaderMatcher, MatchMode, RegexMatcher, build_matcher};
pub use pipeline::{ExtractSummary, extract, project_row, select_header, stream_rows};
pub use sink::OutputSink;
pub use tokenizer::{FieldSpan, RowTokenizer};
