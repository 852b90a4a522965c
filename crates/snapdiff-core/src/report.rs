//! Change reporter: one formatted line per record, written in production
//! order with no buffering or reordering.

use std::io::{self, Write};

use crate::diff::ChangeRecord;

/// Writes change records to an output sink as they arrive.
pub struct Reporter<W: Write> {
    sink: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write one record as a single line in the diff notation.
    pub fn report(&mut self, record: &ChangeRecord) -> io::Result<()> {
        writeln!(self.sink, "{record}")
    }

    /// Recover the sink, e.g. to inspect captured output in tests.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
