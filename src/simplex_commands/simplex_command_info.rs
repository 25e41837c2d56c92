use std::io::Write;

use crate::simplex_framework::{
    infoable::Infoable,
    simplex_command::SimplexCommand,
    simplex_input::SimplexInput,
    simplex_output::{SimplexOutput, SimplexOutputType},
};

pub const SIMPLEX_INFO: SimplexCommand = SimplexCommand::Command {
    name_short: "info",
    name_long: Some("information"),
    explanation_short: "Show information about a linear program.",
    explanation_long: None,
    cli_command: None,
    input_names: &["FILE"],
    input_helps: &["The linear program, as a text (.lp) or JSON file. Use - to read from STDIN."],
    execute: |mut inputs, _| {
        let SimplexInput::LinearProgram(program, file_handler) = inputs.remove(0);
        let mut f = vec![];

        writeln!(
            f,
            "Object was recognised as {} {} (.{}).",
            file_handler.get_article(),
            file_handler,
            file_handler.file_extension
        )?;

        program.info(&mut f)?;

        let paths = SimplexCommand::get_command_paths()
            .iter()
            .map(SimplexCommand::path_to_string)
            .collect::<Vec<_>>();
        writeln!(f, "\nA linear program can be used in:")?;
        writeln!(f, "\t{}", paths.join("\n\t"))?;

        Ok(SimplexOutput::String(String::from_utf8(f)?))
    },
    output_type: &SimplexOutputType::String,
};

#[cfg(test)]
mod tests {
    use crate::{
        input_reader::InputReader,
        simplex_framework::{
            simplex_command::SimplexCommand,
            simplex_input::{SimplexInput, read_as_linear_program},
            simplex_output::SimplexOutput,
        },
    };

    use super::SIMPLEX_INFO;

    #[test]
    fn info_lists_commands() {
        let reader = InputReader::from_path("testfiles/textbook.lp".as_ref()).unwrap();
        let (program, file_handler) = read_as_linear_program(&reader).unwrap();
        let SimplexCommand::Command { execute, .. } = SIMPLEX_INFO else {
            panic!("info is a command");
        };

        let inputs = vec![SimplexInput::LinearProgram(program, file_handler)];
        let output = execute(inputs, None).unwrap();
        let SimplexOutput::String(text) = output else {
            panic!("info returns text");
        };

        assert!(text.starts_with("Object was recognised as a linear program (.lp)."));
        assert!(text.contains("maximise Z = 3 x1 + 5 x2"));
        assert!(text.contains("\tsimplex solve\n"));
        assert!(text.contains("\tsimplex information\n"));
    }
}
