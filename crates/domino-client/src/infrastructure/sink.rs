//! Line-oriented move output.
//!
//! The process that talks to the game server reads `move <index>` lines from
//! our standard output and performs the round-trip itself.

use std::io::{self, Stdout, Write};

use crate::application::play_session::{MoveSink, SinkError};

/// Writes one `move <index>` line per submitted move.
pub struct LineMoveSink<W: Write> {
    out: W,
}

impl<W: Write> LineMoveSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Borrows the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineMoveSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> MoveSink for LineMoveSink<W> {
    fn submit(&mut self, move_index: usize) -> Result<(), SinkError> {
        writeln!(self.out, "move {move_index}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_writes_one_line_per_move() {
        let mut sink = LineMoveSink::new(Vec::new());
        sink.submit(0).unwrap();
        sink.submit(3).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "move 0\nmove 3\n");
    }
}
