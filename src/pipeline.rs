//! Header selection and row streaming.
//!
//! An extraction run moves through these phases:
//!
//! ```text
//! AwaitHeader -> EvaluatingHeader -> StreamingRows -> Done
//!                       |
//!                       +-> (no column matched) -> Done, nothing written
//! ```
//!
//! - The first non-comment line of the first input is the header. Each of its
//!   fields is offered to the matcher; matching fields are written out and
//!   their positions recorded in a [`ColumnSet`].
//! - Every input, in order, then has its rows projected onto those positions.
//!   Inputs after the first have one line (their own header) dropped before
//!   counting starts; its contents are never compared against the first.
//! - At most `max_lines` data rows are read from each input.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::column_set::ColumnSet;
use crate::config::ExtractOptions;
use crate::error::ExtractError;
use crate::line_source::LineSource;
use crate::matcher::HeaderMatcher;
use crate::sink::OutputSink;
use crate::tokenizer::RowTokenizer;

/// Counters describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Header fields that matched.
    pub selected_columns: usize,
    /// False when nothing matched and the run wrote no output.
    pub header_written: bool,
    /// Inputs whose rows were streamed.
    pub files_read: usize,
    /// Data rows written, across all inputs.
    pub rows_written: u64,
    /// Bytes handed to the destination.
    pub bytes_written: u64,
}

/// Run a complete extraction: select columns from the first input's header,
/// then stream every input's rows through `sink`.
///
/// `sink` is flushed before returning `Ok`. With no matching header field the
/// run ends early having written nothing at all.
pub fn extract<R: BufRead, W: Write>(
    inputs: &mut [LineSource<R>],
    matcher: &dyn HeaderMatcher,
    columns: &mut ColumnSet,
    sink: &mut OutputSink<W>,
    options: &ExtractOptions,
) -> Result<ExtractSummary, ExtractError> {
    let mut summary = ExtractSummary::default();

    let Some(first) = inputs.first_mut() else {
        return Err(ExtractError::NoInputs);
    };

    select_header(first, matcher, columns, sink)?;
    summary.selected_columns = columns.count();

    if columns.is_empty() {
        info!(path = %first.path().display(), "no header field matched, nothing to write");
        sink.flush_final()?;
        return Ok(summary);
    }
    sink.end_row()?;
    summary.header_written = true;
    debug!(selected = summary.selected_columns, "header evaluated");

    for (i, input) in inputs.iter_mut().enumerate() {
        if i > 0 && input.next_line()?.is_none() {
            debug!(path = %input.path().display(), "empty input, skipping");
            continue;
        }
        let rows = stream_rows(input, columns, sink, options.max_lines)?;
        debug!(
            path = %input.path().display(),
            rows,
            comments = input.comments_skipped(),
            "input finished"
        );
        summary.rows_written += rows;
        summary.files_read += 1;
    }

    sink.flush_final()?;
    summary.bytes_written = sink.bytes_written();
    Ok(summary)
}

/// Evaluate the first line of `input` as the header.
///
/// Matching fields are appended to `sink` comma-joined, without a trailing
/// newline, and their indices set in `columns`. An input with no lines
/// selects nothing.
pub fn select_header<R: BufRead, W: Write>(
    input: &mut LineSource<R>,
    matcher: &dyn HeaderMatcher,
    columns: &mut ColumnSet,
    sink: &mut OutputSink<W>,
) -> Result<(), ExtractError> {
    let Some(header) = input.next_line()? else {
        return Ok(());
    };

    let mut first = true;
    for (index, field) in RowTokenizer::new(header).fields() {
        if matcher.matches(field) {
            sink.append_field(field, !first)?;
            first = false;
            columns.set(index);
        }
    }
    Ok(())
}

/// Project up to `max_lines` rows of `input` onto `columns`.
///
/// Returns the number of rows written.
pub fn stream_rows<R: BufRead, W: Write>(
    input: &mut LineSource<R>,
    columns: &ColumnSet,
    sink: &mut OutputSink<W>,
    max_lines: usize,
) -> Result<u64, ExtractError> {
    let mut rows = 0;
    while rows < max_lines as u64 {
        let Some(line) = input.next_line()? else {
            break;
        };
        project_row(line, columns, sink)?;
        rows += 1;
    }
    Ok(rows)
}

/// Write the selected fields of one line followed by a newline.
pub fn project_row<W: Write>(
    line: &[u8],
    columns: &ColumnSet,
    sink: &mut OutputSink<W>,
) -> Result<(), ExtractError> {
    let mut first = true;
    for span in RowTokenizer::new(line) {
        if columns.contains(span.index) {
            sink.append_field(span.bytes(line), !first)?;
            first = false;
        }
    }
    sink.end_row()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{ExactMatcher, RegexMatcher};
    use std::io::Cursor;

    fn source(text: &str) -> LineSource<Cursor<Vec<u8>>> {
        LineSource::new(Cursor::new(text.as_bytes().to_vec()), "mem.csv")
    }

    fn run(
        files: &[&str],
        matcher: &dyn HeaderMatcher,
        options: ExtractOptions,
    ) -> (String, ExtractSummary) {
        let mut inputs: Vec<_> = files.iter().map(|f| source(f)).collect();
        let mut columns = ColumnSet::with_capacity(64);
        let mut sink = OutputSink::with_capacity(Vec::new(), options.buffer_capacity).unwrap();
        let summary = extract(&mut inputs, matcher, &mut columns, &mut sink, &options).unwrap();
        (String::from_utf8(sink.into_inner()).unwrap(), summary)
    }

    #[test]
    fn test_single_file_projection() {
        let m = ExactMatcher::new(&["alpha", "beta"]).unwrap();
        let (out, summary) = run(
            &["iter,alpha,beta,sigma\n1,0.5,1.2,0.3\n"],
            &m,
            ExtractOptions::default(),
        );
        assert_eq!(out, "alpha,beta\n0.5,1.2\n");
        assert_eq!(summary.selected_columns, 2);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(summary.bytes_written, out.len() as u64);
    }

    #[test]
    fn test_row_cap_per_file_and_header_skip() {
        let m = ExactMatcher::new(&["b"]).unwrap();
        let options = ExtractOptions {
            max_lines: 1,
            ..ExtractOptions::default()
        };
        let (out, summary) = run(&["a,b\n1,2\n3,4\n", "a,b\n5,6\n7,8\n"], &m, options);
        assert_eq!(out, "b\n2\n6\n");
        assert_eq!(summary.files_read, 2);
        assert_eq!(summary.rows_written, 2);
    }

    #[test]
    fn test_no_match_writes_nothing() {
        let m = RegexMatcher::new(&["^nope$"]).unwrap();
        let (out, summary) = run(&["a,b\n1,2\n"], &m, ExtractOptions::default());
        assert_eq!(out, "");
        assert!(!summary.header_written);
        assert_eq!(summary.files_read, 0);
    }

    #[test]
    fn test_empty_first_file_writes_nothing() {
        let m = RegexMatcher::new(&["a"]).unwrap();
        let (out, summary) = run(&["# just comments\n", "a\n1\n"], &m, ExtractOptions::default());
        assert_eq!(out, "");
        assert_eq!(summary.selected_columns, 0);
    }

    #[test]
    fn test_comments_do_not_count_against_cap() {
        let m = ExactMatcher::new(&["x"]).unwrap();
        let options = ExtractOptions {
            max_lines: 2,
            ..ExtractOptions::default()
        };
        let input = "# stan_version = 2.33\nx,y\n# Adaptation terminated\n1,a\n# step size = 0.8\n2,b\n3,c\n";
        let (out, _) = run(&[input], &m, options);
        assert_eq!(out, "x\n1\n2\n");
    }

    #[test]
    fn test_later_header_dropped_even_if_different() {
        let m = ExactMatcher::new(&["mu"]).unwrap();
        let (out, _) = run(
            &["mu,tau\n1,2\n", "# c\nsomething,else\n3,4\n"],
            &m,
            ExtractOptions::default(),
        );
        assert_eq!(out, "mu\n1\n3\n");
    }

    #[test]
    fn test_empty_later_file_is_skipped() {
        let m = ExactMatcher::new(&["mu"]).unwrap();
        let (out, summary) = run(
            &["mu,tau\n1,2\n", "", "mu,tau\n5,6\n"],
            &m,
            ExtractOptions::default(),
        );
        assert_eq!(out, "mu\n1\n5\n");
        assert_eq!(summary.files_read, 2);
    }

    #[test]
    fn test_unselected_fields_do_not_shift_columns() {
        let m = ExactMatcher::new(&["c"]).unwrap();
        let (out, _) = run(&["a,b,c\n,,z\nxx,,yy\n"], &m, ExtractOptions::default());
        assert_eq!(out, "c\nz\nyy\n");
    }

    #[test]
    fn test_short_row_emits_only_present_fields() {
        let m = ExactMatcher::new(&["a", "c"]).unwrap();
        let (out, _) = run(&["a,b,c\n1\n"], &m, ExtractOptions::default());
        assert_eq!(out, "a,c\n1\n");
    }

    #[test]
    fn test_zero_max_lines_writes_header_only() {
        let m = ExactMatcher::new(&["a"]).unwrap();
        let options = ExtractOptions {
            max_lines: 0,
            ..ExtractOptions::default()
        };
        let (out, _) = run(&["a,b\n1,2\n"], &m, options);
        assert_eq!(out, "a\n");
    }

    #[test]
    fn test_wide_header_grows_column_set() {
        let header: Vec<String> = (0..300).map(|i| format!("c{i}")).collect();
        let row: Vec<String> = (0..300).map(|i| i.to_string()).collect();
        let input = format!("{}\n{}\n", header.join(","), row.join(","));
        let m = ExactMatcher::new(&["c0", "c299"]).unwrap();
        let (out, summary) = run(&[input.as_str()], &m, ExtractOptions::default());
        assert_eq!(out, "c0,c299\n0,299\n");
        assert_eq!(summary.selected_columns, 2);
    }

    #[test]
    fn test_small_buffer_gives_same_output() {
        let m = RegexMatcher::new(&["^theta"]).unwrap();
        let input = "lp__,theta.1,theta.2\n-7.1,0.123,4.56\n-7.3,0.789,1.01\n";
        let (small, _) = run(
            &[input],
            &m,
            ExtractOptions {
                buffer_capacity: 8,
                ..ExtractOptions::default()
            },
        );
        let (large, _) = run(&[input], &m, ExtractOptions::default());
        assert_eq!(small, large);
        assert_eq!(large, "theta.1,theta.2\n0.123,4.56\n0.789,1.01\n");
    }

    #[test]
    fn test_field_larger_than_buffer_fails() {
        let m = ExactMatcher::new(&["a"]).unwrap();
        let mut inputs = vec![source("a\nabcdefgh\n")];
        let mut columns = ColumnSet::default();
        let mut sink = OutputSink::with_capacity(Vec::new(), 4).unwrap();
        let err = extract(
            &mut inputs,
            &m,
            &mut columns,
            &mut sink,
            &ExtractOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::FieldTooLarge { .. }));
    }

    #[test]
    fn test_no_inputs() {
        let m = ExactMatcher::new(&["a"]).unwrap();
        let mut inputs: Vec<LineSource<Cursor<Vec<u8>>>> = Vec::new();
        let mut columns = ColumnSet::default();
        let mut sink = OutputSink::with_capacity(Vec::new(), 4).unwrap();
        let result = extract(
            &mut inputs,
            &m,
            &mut columns,
            &mut sink,
            &ExtractOptions::default(),
        );
        assert!(matches!(result, Err(ExtractError::NoInputs)));
    }
}
