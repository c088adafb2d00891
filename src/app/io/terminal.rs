//! Line-based event stream over any buffered reader (stdin in production)

use super::{EventStream, HostEvent};
use anyhow::Result;
use std::io::{self, BufRead, StdinLock};

pub struct LineEventStream<R: BufRead> {
    reader: R,
}

impl LineEventStream<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> LineEventStream<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> EventStream for LineEventStream<R> {
    /// Blank and unparseable lines are logged and skipped
    fn read(&mut self) -> Result<Option<HostEvent>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<HostEvent>() {
                Ok(event) => return Ok(Some(event)),
                Err(e) => tracing::warn!("Ignoring input {:?}: {:#}", line.trim(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn line_stream_should_skip_blank_and_invalid_lines() {
        let input = "go movies/1\n\n   \nwiggle\nclick 3\n";
        let mut stream = LineEventStream::new(Cursor::new(input));

        assert_eq!(
            stream.read().unwrap(),
            Some(HostEvent::Navigate("movies/1".into()))
        );
        assert_eq!(stream.read().unwrap(), Some(HostEvent::Click(3)));
        assert_eq!(stream.read().unwrap(), None);
    }
}
