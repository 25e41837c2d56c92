use anyhow::Result;
use std::{fmt::Display, io::BufRead};

use crate::simplex_objects::linear_program::{
    LinearProgram, SIMPLEX_LINEAR_PROGRAM, SIMPLEX_LINEAR_PROGRAM_JSON,
};

/**
 * The order of this list is important: importers are attempted in order, so the more
 * restrictive formats should come first.
 */
pub const SIMPLEX_FILE_HANDLERS: &'static [SimplexFileHandler] =
    &[SIMPLEX_LINEAR_PROGRAM, SIMPLEX_LINEAR_PROGRAM_JSON];

#[derive(Clone, Debug)]
pub struct SimplexFileHandler {
    pub name: &'static str,
    pub article: &'static str, //a or an
    pub file_extension: &'static str,
    pub format_specification: &'static str,
    pub importer: fn(&mut dyn BufRead) -> Result<LinearProgram>,
}

impl SimplexFileHandler {
    pub fn get_article(&self) -> &str {
        self.article
    }

    /// Whether a file name carries this handler's extension.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        file_name.ends_with(&format!(".{}", self.file_extension))
    }
}

impl Display for SimplexFileHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for SimplexFileHandler {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SimplexFileHandler {}
