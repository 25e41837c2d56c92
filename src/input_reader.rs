use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Cursor, Read},
    path::Path,
};

/// The complete contents of an input, so that several parsers can be attempted on it.
pub struct InputReader {
    source: String,
    bytes: Vec<u8>,
}

impl InputReader {
    pub fn from_stdin() -> Result<Self> {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Could not read from STDIN.")?;
        log::info!("read {} bytes from STDIN", bytes.len());
        Ok(Self {
            source: "STDIN".to_string(),
            bytes,
        })
    }

    /// Reads a file; the path `-` stands for STDIN.
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.as_os_str() == "-" {
            return Self::from_stdin();
        }
        let bytes = fs::read(path)
            .with_context(|| format!("Could not read file `{}`.", path.display()))?;
        log::info!("read {} bytes from {}", bytes.len(), path.display());
        Ok(Self {
            source: path.display().to_string(),
            bytes,
        })
    }

    pub fn from_string(source: &str, contents: &str) -> Self {
        Self {
            source: source.to_string(),
            bytes: contents.as_bytes().to_vec(),
        }
    }

    /// A fresh reader over the contents, positioned at the start.
    pub fn get(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes.as_slice())
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use std::{io::BufRead, path::PathBuf};

    use super::InputReader;

    #[test]
    fn reader_can_be_read_twice() {
        let input = InputReader::from_string("test", "first\nsecond\n");
        for _ in 0..2 {
            let mut line = String::new();
            input.get().read_line(&mut line).unwrap();
            assert_eq!(line, "first\n");
        }
        assert_eq!(input.source(), "test");
    }

    #[test]
    fn missing_file() {
        let path = "testfiles/does-not-exist.lp".parse::<PathBuf>().unwrap();
        assert!(InputReader::from_path(&path).is_err());
    }

    #[test]
    fn reader_file() {
        let path = "testfiles/single-constraint.lp".parse::<PathBuf>().unwrap();
        InputReader::from_path(&path).unwrap();
    }
}
