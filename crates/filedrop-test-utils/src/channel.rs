//! Scripted operator input and captured prompt output.
//!
//! [`ScriptedInput`] is a `BufRead` that hands out one scripted line at a
//! time and bumps a shared [`LineCounter`] each time a line is taken, so a
//! test can assert exactly how often the engine blocked on the operator.
//! [`Transcript`] is a cloneable `Write` sink that records every prompt.

use std::collections::VecDeque;
use std::io::{self, BufRead, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Number of lines the engine has pulled from a [`ScriptedInput`].
#[derive(Debug, Clone, Default)]
pub struct LineCounter(Arc<AtomicUsize>);

impl LineCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Operator input fed from a fixed script.
///
/// Each scripted entry is delivered as one `\n`-terminated line. Once the
/// script runs out the reader reports end-of-stream.
#[derive(Debug)]
pub struct ScriptedInput {
    pending: VecDeque<Vec<u8>>,
    current: Vec<u8>,
    pos: usize,
    counter: LineCounter,
}

impl ScriptedInput {
    /// Script the given lines; a terminator is appended to each.
    pub fn lines<I, S>(lines: I) -> (Self, LineCounter)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::raw(lines.into_iter().map(|line| format!("{}\n", line.as_ref())))
    }

    /// Script raw chunks delivered verbatim, for terminator edge cases.
    pub fn raw<I, S>(chunks: I) -> (Self, LineCounter)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let counter = LineCounter::default();
        let input = Self {
            pending: chunks
                .into_iter()
                .map(|chunk| chunk.as_ref().as_bytes().to_vec())
                .collect(),
            current: Vec::new(),
            pos: 0,
            counter: counter.clone(),
        };
        (input, counter)
    }
}

impl Read for ScriptedInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ScriptedInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.current.len() {
            if let Some(next) = self.pending.pop_front() {
                self.current = next;
                self.pos = 0;
                self.counter.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        Ok(&self.current[self.pos.min(self.current.len())..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.current.len());
    }
}

/// Shared capture of everything the engine wrote to the operator.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Arc<Mutex<Vec<u8>>>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// How many times `needle` appears in the transcript.
    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_line_once() {
        let (mut input, counter) = ScriptedInput::lines(["first", "second"]);
        let mut line = String::new();

        input.read_line(&mut line).unwrap();
        assert_eq!(line, "first\n");
        assert_eq!(counter.get(), 1);

        line.clear();
        input.read_line(&mut line).unwrap();
        assert_eq!(line, "second\n");
        assert_eq!(counter.get(), 2);

        line.clear();
        assert_eq!(input.read_line(&mut line).unwrap(), 0);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn transcript_clones_share_output() {
        let transcript = Transcript::new();
        let mut writer = transcript.clone();
        write!(writer, "name: ").unwrap();

        assert_eq!(transcript.contents(), "name: ");
        assert_eq!(transcript.count("name"), 1);
    }
}
