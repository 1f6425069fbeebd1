//! Line-oriented operator channel
//!
//! Every interaction is "write a prompt without a newline, block for one
//! line". [`BufChannel`] adapts any `BufRead` + `Write` pair; [`stdio`] is
//! the process terminal.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::path::PathBuf;

use crate::{Error, Result};

/// A blocking, line-at-a-time conversation with the operator.
pub trait LineChannel: Send {
    /// Write `message` as-is (no newline appended) and flush it.
    fn prompt(&mut self, message: &str) -> io::Result<()>;

    /// Block until one full line arrives and return it without its
    /// terminator or any carriage returns.
    ///
    /// End-of-stream, including a last line that never got its `\n`, is an
    /// `UnexpectedEof` error. Bytes that are not UTF-8 come back as U+FFFD.
    fn read_line(&mut self) -> io::Result<String>;
}

/// [`LineChannel`] over a buffered reader and a writer.
#[derive(Debug)]
pub struct BufChannel<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> BufChannel<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R, W> LineChannel for BufChannel<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn prompt(&mut self, message: &str) -> io::Result<()> {
        self.output.write_all(message.as_bytes())?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        if line.last() != Some(&b'\n') {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before end of line",
            ));
        }
        Ok(strip_line_terminator(&String::from_utf8_lossy(&line)))
    }
}

/// The process terminal: stdin for answers, stdout for prompts.
pub fn stdio() -> BufChannel<BufReader<Stdin>, Stdout> {
    BufChannel::new(BufReader::new(io::stdin()), io::stdout())
}

/// Drop the trailing `\n` and every `\r` left behind by CRLF input.
pub fn strip_line_terminator(line: &str) -> String {
    line.strip_suffix('\n').unwrap_or(line).replace('\r', "")
}

/// Interpret an answer as a filesystem path.
///
/// Terminals that support drag-and-drop often wrap the dropped path in
/// double quotes; one surrounding pair is removed when the answer is longer
/// than the two quotes themselves.
pub fn clean_path_answer(answer: &str) -> PathBuf {
    let unquoted = if answer.len() > 2 && answer.starts_with('"') && answer.ends_with('"') {
        &answer[1..answer.len() - 1]
    } else {
        answer
    };
    PathBuf::from(unquoted)
}

/// Prompt and block for the reply, mapping channel failures to [`Error::Channel`].
pub(crate) fn ask(channel: &mut dyn LineChannel, message: &str) -> Result<String> {
    channel.prompt(message).map_err(Error::channel)?;
    channel.read_line().map_err(Error::channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case("plain\n", "plain")]
    #[case("windows\r\n", "windows")]
    #[case("stray\r\r\n", "stray")]
    #[case("in\rside\n", "inside")]
    #[case("\n", "")]
    fn strips_terminator_and_carriage_returns(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(strip_line_terminator(raw), expected);
    }

    #[rstest]
    #[case(r#""/tmp/a.txt""#, "/tmp/a.txt")]
    #[case("/tmp/a.txt", "/tmp/a.txt")]
    #[case(r#""a""#, "a")]
    // Too short to hold anything between the quotes.
    #[case(r#""""#, r#""""#)]
    #[case(r#"""#, r#"""#)]
    // Only one side quoted.
    #[case(r#""/tmp/a.txt"#, r#""/tmp/a.txt"#)]
    // Only the outer pair goes.
    #[case(r#"""x"""#, r#""x""#)]
    fn strips_one_pair_of_surrounding_quotes(#[case] answer: &str, #[case] expected: &str) {
        assert_eq!(clean_path_answer(answer), PathBuf::from(expected));
    }

    #[test]
    fn reads_lines_in_order() {
        let mut channel = BufChannel::new(Cursor::new("one\r\ntwo\n"), Vec::new());

        assert_eq!(channel.read_line().unwrap(), "one");
        assert_eq!(channel.read_line().unwrap(), "two");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let input = Cursor::new(b"/tmp/\xff.txt\r\nnext\n".to_vec());
        let mut channel = BufChannel::new(input, Vec::new());

        assert_eq!(channel.read_line().unwrap(), "/tmp/\u{FFFD}.txt");
        assert_eq!(channel.read_line().unwrap(), "next");
    }

    #[test]
    fn end_of_stream_is_an_error() {
        let mut channel = BufChannel::new(Cursor::new(""), Vec::new());

        let err = channel.read_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn unterminated_last_line_is_an_error() {
        let mut channel = BufChannel::new(Cursor::new("partial"), Vec::new());

        let err = channel.read_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn prompt_writes_without_newline() {
        let mut channel = BufChannel::new(Cursor::new(""), Vec::new());
        channel.prompt("Date: ").unwrap();

        assert_eq!(channel.output, b"Date: ");
    }
}
