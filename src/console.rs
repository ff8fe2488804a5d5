use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented terminal adapter. Generic over its streams so flows can be
/// driven by scripted input in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prints `label` without a newline and reads one trimmed line.
    /// `None` means the input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_trims_and_reports_end_of_input() {
        let mut console = Console::new(Cursor::new("  EMP001 \n"), Vec::new());
        assert_eq!(console.prompt("id: ").unwrap().as_deref(), Some("EMP001"));
        assert_eq!(console.prompt("id: ").unwrap(), None);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out, "id: id: ");
    }

    #[test]
    fn blank_line_is_not_end_of_input() {
        let mut console = Console::new(Cursor::new("\n"), Vec::new());
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some(""));
    }
}
