//! Run options.

/// Data rows read from each input file unless told otherwise.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Output buffer size, 8 MiB. Also the largest single field that can be
/// written.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024 * 1024;

/// Tunables for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Data rows read per file; the header and comment lines do not count.
    pub max_lines: usize,
    /// Output buffer size in bytes.
    pub buffer_capacity: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
