use crate::simplex_framework::{
    simplex_command::SimplexCommand,
    simplex_output::{SimplexOutput, SimplexOutputType},
};

pub const SIMPLEX_CONVERT: SimplexCommand = SimplexCommand::Command {
    name_short: "convert",
    name_long: None,
    explanation_short: "Convert a linear program between the text and JSON formats.",
    explanation_long: Some(
        "Read a linear program in any supported format and write it out again. The output is JSON if the output file ends in .json, and text otherwise.",
    ),
    cli_command: None,
    input_names: &["FILE"],
    input_helps: &["The linear program, as a text (.lp) or JSON file. Use - to read from STDIN."],
    execute: |mut inputs, _| {
        let program = inputs.remove(0).into_linear_program();
        Ok(SimplexOutput::LinearProgram(program))
    },
    output_type: &SimplexOutputType::LinearProgram,
};
