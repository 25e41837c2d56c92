use anyhow::{Context, Result};
use std::{
    fmt::{self, Display},
    fs::File,
    io::Write,
    path::PathBuf,
};

use crate::{
    optimisation_algorithms::simplex::SimplexOutcome,
    simplex_objects::linear_program::LinearProgram,
};

use super::exportable::Exportable;

pub enum SimplexOutput {
    LinearProgram(LinearProgram),
    Outcome(SimplexOutcome),
    String(String),
}

impl SimplexOutput {
    pub fn get_type(&self) -> SimplexOutputType {
        match self {
            SimplexOutput::LinearProgram(_) => SimplexOutputType::LinearProgram,
            SimplexOutput::Outcome(_) => SimplexOutputType::Outcome,
            SimplexOutput::String(_) => SimplexOutputType::String,
        }
    }

    fn as_exportable(&self) -> &dyn Exportable {
        match self {
            SimplexOutput::LinearProgram(program) => program,
            SimplexOutput::Outcome(outcome) => outcome,
            SimplexOutput::String(string) => string,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SimplexOutputType {
    LinearProgram,
    Outcome,
    String,
}

impl Display for SimplexOutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimplexOutputType::LinearProgram => Display::fmt(&"linear program", f),
            SimplexOutputType::Outcome => Display::fmt(&"simplex trace", f),
            SimplexOutputType::String => Display::fmt(&"text", f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexExporter {
    Text,
    Json,
}

impl SimplexExporter {
    /// JSON for files ending in `.json`; text otherwise, and always for STDOUT.
    pub fn for_file(to_file: Option<&PathBuf>) -> Self {
        match to_file {
            Some(path) if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) => {
                SimplexExporter::Json
            }
            _ => SimplexExporter::Text,
        }
    }

    pub fn export_from_object(&self, output: &SimplexOutput, f: &mut dyn Write) -> Result<()> {
        let object = output.as_exportable();
        match self {
            SimplexExporter::Text => object.export(f),
            SimplexExporter::Json => object.export_json(f),
        }
    }

    pub fn get_article(&self) -> &str {
        "a"
    }
}

impl Display for SimplexExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimplexExporter::Text => write!(f, "text file"),
            SimplexExporter::Json => write!(f, "JSON file"),
        }
    }
}

pub fn export_object(
    to_file: &PathBuf,
    object: SimplexOutput,
    exporter: SimplexExporter,
) -> Result<()> {
    let file = File::create(to_file)
        .with_context(|| format!("Writing result to file {:?}.", to_file))?;
    let mut writer = std::io::BufWriter::new(&file);
    exporter
        .export_from_object(&object, &mut writer)
        .with_context(|| format!("Writing result to file {:?}.", to_file))?;
    return writer.flush().with_context(|| format!("writing result to file {:?}", to_file));
}

pub fn export_to_string(object: SimplexOutput, exporter: SimplexExporter) -> Result<String> {
    let mut f = vec![];
    exporter.export_from_object(&object, &mut f)?;
    Ok(String::from_utf8(f)?)
}
