//! Line-at-a-time reading of one input file.
//!
//! Stan writes configuration and diagnostics into its sample files as lines
//! starting with `#`. Those are skipped here so that callers only ever see the
//! header and the data rows.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// Marks a line that carries no tabular data.
pub const COMMENT_PREFIX: u8 = b'#';

/// Read buffer used for files opened by [`open_input`].
pub const READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Yields non-comment lines from one stream, terminators stripped.
///
/// The line buffer is reused across calls; a returned line is only valid
/// until the next call to [`LineSource::next_line`].
pub struct LineSource<R> {
    reader: R,
    path: PathBuf,
    line: Vec<u8>,
    comments: u64,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a reader. `path` is only used in error messages.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            line: Vec::new(),
            comments: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Comment lines skipped so far.
    pub fn comments_skipped(&self) -> u64 {
        self.comments
    }

    /// Next non-comment line, or `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<&[u8]>, ExtractError> {
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.line)
                .map_err(|source| ExtractError::Read {
                    path: self.path.clone(),
                    source,
                })?;
            if n == 0 {
                return Ok(None);
            }
            if self.line[0] == COMMENT_PREFIX {
                self.comments += 1;
                continue;
            }
            strip_terminator(&mut self.line);
            return Ok(Some(self.line.as_slice()));
        }
    }
}

fn strip_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

/// Open `path` for sequential reading; `-` is standard input.
pub fn open_input(path: &Path) -> Result<LineSource<Box<dyn BufRead>>, ExtractError> {
    if path.as_os_str() == "-" {
        let reader: Box<dyn BufRead> = Box::new(BufReader::new(io::stdin()));
        return Ok(LineSource::new(reader, path));
    }

    let file = File::open(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader: Box<dyn BufRead> = Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file));
    Ok(LineSource::new(reader, path))
}

/// Open every path in order, failing on the first that cannot be opened.
pub fn open_inputs<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<LineSource<Box<dyn BufRead>>>, ExtractError> {
    if paths.is_empty() {
        return Err(ExtractError::NoInputs);
    }
    paths.iter().map(|p| open_input(p.as_ref())).collect()
}
