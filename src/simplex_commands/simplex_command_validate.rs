use anyhow::Context;

use crate::simplex_framework::{
    simplex_command::SimplexCommand,
    simplex_input::SimplexInput,
    simplex_output::{SimplexOutput, SimplexOutputType},
};

pub const SIMPLEX_VALIDATE: SimplexCommand = SimplexCommand::Command {
    name_short: "validate",
    name_long: None,
    explanation_short: "Check that a linear program can be solved as given, and return the problem if it cannot.",
    explanation_long: Some(
        "Check that a linear program can be solved as given: it has at least one variable and one constraint, every row has exactly one coefficient per variable, all numbers are finite and all right-hand sides are non-negative.",
    ),
    cli_command: None,
    input_names: &["FILE"],
    input_helps: &["The linear program, as a text (.lp) or JSON file. Use - to read from STDIN."],
    execute: |mut inputs, _| {
        let SimplexInput::LinearProgram(program, file_handler) = inputs.remove(0);
        program.validate().with_context(|| {
            format!("validating {} {}", file_handler.get_article(), file_handler)
        })?;
        Ok(SimplexOutput::String(format!(
            "The linear program is a valid {} with {} variables and {} constraints.",
            file_handler,
            program.number_of_variables(),
            program.number_of_constraints()
        )))
    },
    output_type: &SimplexOutputType::String,
};
