use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use std::path::PathBuf;

use crate::{input_reader::InputReader, simplex_objects::linear_program::LinearProgram};

use super::simplex_file_handler::{SIMPLEX_FILE_HANDLERS, SimplexFileHandler};

pub enum SimplexInput {
    LinearProgram(LinearProgram, &'static SimplexFileHandler),
}

impl SimplexInput {
    pub fn into_linear_program(self) -> LinearProgram {
        match self {
            SimplexInput::LinearProgram(program, _) => program,
        }
    }
}

pub fn get_reader(cli_matches: &ArgMatches, cli_id: &str) -> Result<InputReader> {
    match cli_matches.try_get_one::<PathBuf>(cli_id)? {
        Some(from_file) => InputReader::from_path(from_file),
        None => Err(anyhow!(
            "No argument given, or it could not be parsed as a path."
        )),
    }
}

/**
 * Attempts every file handler in order. Returns the error of the last attempt if none of
 * them succeeds.
 */
pub fn read_as_linear_program(
    reader: &InputReader,
) -> Result<(LinearProgram, &'static SimplexFileHandler)> {
    let mut error = None;
    for file_handler in SIMPLEX_FILE_HANDLERS {
        match (file_handler.importer)(&mut reader.get())
            .with_context(|| format!("Parsing as {} {}.", file_handler.get_article(), file_handler))
        {
            Ok(program) => {
                log::info!(
                    "{} was recognised as {} {}",
                    reader.source(),
                    file_handler.get_article(),
                    file_handler
                );
                return Ok((program, file_handler));
            }
            Err(e) => error = Some(e),
        }
    }
    match error {
        Some(e) => Err(e),
        None => Err(anyhow!("no file handlers available")),
    }
}

pub fn read_input(cli_matches: &ArgMatches, cli_id: &str) -> Result<SimplexInput> {
    let reader = get_reader(cli_matches, cli_id).context("Getting reader.")?;
    let (program, file_handler) = read_as_linear_program(&reader)
        .with_context(|| format!("Reading {} as a linear program.", reader.source()))?;
    Ok(SimplexInput::LinearProgram(program, file_handler))
}
