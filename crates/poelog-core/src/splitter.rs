//! Line splitting for the live log stream.
//!
//! The game terminates log records with a carriage return. A read from the
//! tail of the file can land anywhere, including mid-line, so bytes after
//! the last CR are carried over until the next chunk arrives. No line is
//! ever emitted without its terminator, which makes the output independent
//! of how the byte stream was chunked.

use tracing::warn;

/// Splits an incoming byte stream into complete, CR-terminated lines.
#[derive(Debug, Default)]
pub struct LineSplitter {
    /// Bytes after the last terminator, held until the next chunk.
    remainder: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, returning every complete line it finished.
    ///
    /// The log is CRLF-terminated on disk; the LF lands at the front of the
    /// following segment and is stripped there, so the position of chunk
    /// boundaries never changes the output.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.remainder.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.remainder[start..].iter().position(|&b| b == b'\r') {
            let mut segment = &self.remainder[start..start + offset];
            if segment.first() == Some(&b'\n') {
                segment = &segment[1..];
            }
            match std::str::from_utf8(segment) {
                Ok(line) => lines.push(line.to_owned()),
                Err(err) => {
                    // Drop the line, keep tailing.
                    warn!(
                        target: "poelog::splitter",
                        "Dropping undecodable log line ({} bytes): {}",
                        segment.len(),
                        err
                    );
                }
            }
            start += offset + 1;
        }
        self.remainder.drain(..start);

        lines
    }

    /// Number of carried-over bytes still waiting for a terminator.
    pub fn pending(&self) -> usize {
        self.remainder.len()
    }

    /// Discard any carried-over bytes (used when the log file is rotated).
    pub fn reset(&mut self) {
        self.remainder.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_chunk() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"first\r\nsecond\r\n");
        assert_eq!(lines, vec!["first", "second"]);
        // The trailing LF of the last CRLF is carried over.
        assert_eq!(splitter.pending(), 1);
    }

    #[test]
    fn test_partial_line_carried_over() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"incompl").is_empty());
        let lines = splitter.push(b"ete\r\nnext\r");
        assert_eq!(lines, vec!["incomplete", "next"]);
        assert_eq!(splitter.pending(), 0);
    }

    #[test]
    fn test_no_terminator_holds_indefinitely() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"never").is_empty());
        assert!(splitter.push(b" terminated").is_empty());
        assert_eq!(splitter.pending(), "never terminated".len());
    }

    #[test]
    fn test_bare_cr_terminator() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"one\rtwo\r");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_invalid_utf8_dropped() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"good\r\n\xff\xfe\r\nalso good\r");
        assert_eq!(lines, vec!["good", "also good"]);
    }

    #[test]
    fn test_chunk_boundary_inside_crlf() {
        let mut splitter = LineSplitter::new();
        let mut lines = splitter.push(b"first\r");
        lines.extend(splitter.push(b"\nsecond\r"));
        assert_eq!(lines, vec!["first", "second"]);
    }

    proptest! {
        /// Splitting in one call and splitting across arbitrary chunk
        /// boundaries must produce identical lines.
        #[test]
        fn prop_chunking_never_changes_output(
            data in proptest::collection::vec(any::<u8>(), 0..512),
            cuts in proptest::collection::vec(0usize..512, 0..8),
        ) {
            let mut whole = LineSplitter::new();
            let expected = whole.push(&data);

            let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
            cuts.sort_unstable();
            let mut chunked = LineSplitter::new();
            let mut actual = Vec::new();
            let mut start = 0;
            for cut in cuts {
                actual.extend(chunked.push(&data[start..cut.max(start)]));
                start = cut.max(start);
            }
            actual.extend(chunked.push(&data[start..]));

            prop_assert_eq!(actual, expected);
        }
    }
}
