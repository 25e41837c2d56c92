use anyhow::{Context, Result, anyhow};
use std::io::BufRead;

/// Reads a line-based file, skipping lines that start with `#`, and keeps track of the line
/// number for error messages.
pub struct LineReader<'a> {
    reader: &'a mut dyn BufRead,
    line_no: usize,
    line: String,
}

impl<'a> LineReader<'a> {
    pub fn new(reader: &'a mut (dyn BufRead + 'a)) -> Self {
        LineReader::<'a> {
            reader: reader,
            line_no: 0,
            line: String::new(),
        }
    }

    pub fn get_last_line_number(&self) -> usize {
        self.line_no
    }

    pub fn get_last_line(&self) -> &str {
        &self.line
    }

    fn next_line_raw(&mut self) -> Result<()> {
        self.line.clear();

        match self.reader.read_line(&mut self.line) {
            Ok(0) => return Err(anyhow!("premature end of file")),
            Ok(_n) => {
                if self.line.ends_with('\n') {
                    self.line.pop();
                    if self.line.ends_with('\r') {
                        self.line.pop();
                    }
                }
                self.line_no += 1;
                return Ok(());
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn next_line(&mut self) -> Result<()> {
        self.next_line_raw()?;
        while self.get_last_line().trim_start().starts_with('#') {
            self.next_line_raw()?;
        }
        Ok(())
    }

    pub fn next_line_string(&mut self) -> Result<String> {
        self.next_line()?;
        Ok(self.get_last_line().to_string())
    }

    pub fn next_line_index(&mut self) -> Result<usize> {
        self.next_line()?;
        self.get_last_line()
            .trim()
            .parse::<usize>()
            .with_context(|| {
                format!(
                    "failed to read integer at line {}; found `{}`",
                    self.get_last_line_number(),
                    self.get_last_line()
                )
            })
    }

    /**
     * Reads a line of whitespace-separated numbers.
     *
     * With `expected` set, the line must hold exactly that many numbers. Without it, any
     * number of values (including none) is returned as-is.
     */
    pub fn next_line_numbers(&mut self, expected: Option<usize>) -> Result<Vec<f64>> {
        self.next_line()?;
        let line_no = self.get_last_line_number();

        let values = self
            .get_last_line()
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| {
                word.parse::<f64>().with_context(|| {
                    format!(
                        "failed to read number {} at line {}; found `{}`",
                        i + 1,
                        line_no,
                        word
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(expected) = expected {
            if values.len() != expected {
                return Err(anyhow!(
                    "expected {} numbers at line {}, but found {}",
                    expected,
                    line_no,
                    values.len()
                ));
            }
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::LineReader;

    #[test]
    fn comments_are_skipped() {
        let mut input = Cursor::new("# comment\n  # indented comment\n3\n");
        let mut reader = LineReader::new(&mut input);
        assert_eq!(reader.next_line_index().unwrap(), 3);
        assert_eq!(reader.get_last_line_number(), 3);
        assert!(reader.next_line().is_err());
    }

    #[test]
    fn numbers() {
        let mut input = Cursor::new("1 -2.5\t3e1\r\n\n4 x\n");
        let mut reader = LineReader::new(&mut input);
        assert_eq!(reader.next_line_numbers(Some(3)).unwrap(), vec![1.0, -2.5, 30.0]);
        assert_eq!(reader.next_line_numbers(None).unwrap(), Vec::<f64>::new());
        assert!(reader.next_line_numbers(None).is_err());
    }

    #[test]
    fn wrong_count() {
        let mut input = Cursor::new("1 2\n");
        let mut reader = LineReader::new(&mut input);
        assert!(reader.next_line_numbers(Some(3)).is_err());
    }
}
