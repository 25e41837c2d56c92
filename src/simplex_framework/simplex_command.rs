use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::{collections::BTreeSet, path::PathBuf};

use crate::simplex_commands::{
    simplex_command_convert, simplex_command_info, simplex_command_solve,
    simplex_command_validate,
};

use super::{
    simplex_file_handler::SIMPLEX_FILE_HANDLERS,
    simplex_input::{self, SimplexInput},
    simplex_output::{self, SimplexExporter, SimplexOutput, SimplexOutputType},
};

pub const SIMPLEX_COMMANDS: SimplexCommand = SimplexCommand::Group {
    name_short: "simplex",
    name_long: None,
    explanation_short: "Simplex: maximise a linear program with the tableau method and show every pivot.",
    explanation_long: None,
    children: &[
        &simplex_command_convert::SIMPLEX_CONVERT,
        &simplex_command_info::SIMPLEX_INFO,
        &simplex_command_solve::SIMPLEX_SOLVE,
        &simplex_command_validate::SIMPLEX_VALIDATE,
    ],
};

pub const ARG_SHORT_OUTPUT: char = 'o';
pub const ARG_ID_OUTPUT: &str = "output";

pub enum SimplexCommand {
    Group {
        name_short: &'static str,
        name_long: Option<&'static str>,
        explanation_short: &'static str,
        explanation_long: Option<&'static str>,
        children: &'static [&'static SimplexCommand],
    },
    Command {
        name_short: &'static str,
        name_long: Option<&'static str>,
        explanation_short: &'static str,
        explanation_long: Option<&'static str>,
        //extra cli arguments; an output -o argument is always added
        cli_command: Option<fn(command: Command) -> Command>,

        input_names: &'static [&'static str],
        input_helps: &'static [&'static str],

        //the cli_matches are absent when the command is run without a command line
        execute: fn(
            inputs: Vec<SimplexInput>,
            cli_matches: Option<&ArgMatches>,
        ) -> Result<SimplexOutput>,
        output_type: &'static SimplexOutputType,
    },
}

impl SimplexCommand {
    pub fn build_cli(&self) -> Command {
        let mut command;
        match self {
            SimplexCommand::Group {
                name_short,
                name_long,
                explanation_short,
                explanation_long,
                children,
            } => {
                let name = if let Some(x) = name_long { x } else { name_short };
                command = Command::new(name)
                    .about(explanation_short)
                    .subcommand_required(true)
                    .allow_external_subcommands(false);

                if name_long.is_some() {
                    command = command.alias(name_short);
                }

                if let Some(l) = explanation_long {
                    command = command.long_about(l);
                }

                for child in children.iter() {
                    command = command.subcommand(child.build_cli());
                }
            }
            SimplexCommand::Command {
                name_short,
                name_long,
                explanation_short,
                explanation_long,
                cli_command,
                input_names,
                input_helps,
                ..
            } => {
                let name = if let Some(x) = name_long { x } else { name_short };
                command = Command::new(name).about(explanation_short);

                if name_long.is_some() {
                    command = command.alias(name_short);
                }

                if let Some(l) = explanation_long {
                    command = command.long_about(l);
                }

                for (i, (input_name, input_help)) in
                    input_names.iter().zip(input_helps.iter()).enumerate()
                {
                    let arg = Arg::new(format!("{}x{}", input_name, i))
                        .action(ArgAction::Set)
                        .value_name(input_name)
                        .help(input_help)
                        .long_help(Self::input_long_help(input_help))
                        .required(true)
                        .value_parser(value_parser!(PathBuf));

                    command = command.arg(arg);
                }

                if let Some(f) = cli_command {
                    command = (f)(command);
                }

                command = command.arg(
                    Arg::new(ARG_ID_OUTPUT)
                        .short(ARG_SHORT_OUTPUT)
                        .long(ARG_ID_OUTPUT)
                        .action(ArgAction::Set)
                        .value_name("FILE")
                        .help("Saves the result to a file. Files ending in .json are written as JSON.")
                        .required(false)
                        .value_parser(value_parser!(PathBuf)),
                );
            }
        };
        return command;
    }

    /// The help of an input, followed by the specification of every supported file format.
    fn input_long_help(input_help: &str) -> String {
        let mut result = format!("{}\n\nSupported formats:", input_help);
        for file_handler in SIMPLEX_FILE_HANDLERS {
            result.push_str(&format!(
                "\n\n{} (.{}):\n    {}",
                file_handler, file_handler.file_extension, file_handler.format_specification
            ));
        }
        result
    }

    pub fn long_name(&self) -> &str {
        match self {
            SimplexCommand::Group {
                name_short,
                name_long,
                ..
            }
            | SimplexCommand::Command {
                name_short,
                name_long,
                ..
            } => match name_long {
                Some(x) => x,
                None => name_short,
            },
        }
    }

    pub fn execute(&self, cli_matches: &ArgMatches) -> Result<()> {
        match self {
            SimplexCommand::Group { children, .. } => {
                for child in children.iter() {
                    if let Some(sub_matches) = cli_matches.subcommand_matches(child.long_name()) {
                        return child.execute(sub_matches);
                    }
                }
            }
            SimplexCommand::Command {
                input_names,
                execute,
                output_type,
                ..
            } => {
                //read the inputs
                let mut inputs = vec![];
                for (i, input_name) in input_names.iter().enumerate() {
                    let cli_id = format!("{}x{}", input_name, i);

                    log::info!("Reading {}", input_name);
                    let input = simplex_input::read_input(cli_matches, &cli_id)
                        .with_context(|| format!("Reading parameter {}.", input_name))?;
                    inputs.push(input);
                }

                log::info!("Starting {}", self.long_name());

                let result = (execute)(inputs, Some(cli_matches))?;

                if &&result.get_type() != output_type {
                    return Err(anyhow!(
                        "Output type {} does not match the declared output of {}.",
                        result.get_type(),
                        output_type
                    ));
                }

                let to_file = cli_matches.get_one::<PathBuf>(ARG_ID_OUTPUT);
                let exporter = SimplexExporter::for_file(to_file);
                if let Some(to_file) = to_file {
                    //write result to file
                    log::info!(
                        "Writing result to {:?} as {} {}",
                        to_file,
                        exporter.get_article(),
                        exporter
                    );
                    simplex_output::export_object(to_file, result, exporter)?;
                } else {
                    //write result to STDOUT
                    log::info!("Writing result as {} {}", exporter.get_article(), exporter);
                    print!("{}", simplex_output::export_to_string(result, exporter)?);
                }

                return Ok(());
            }
        }
        Err(anyhow!("command not recognised"))
    }

    pub fn path_to_string(path: &Vec<&SimplexCommand>) -> String {
        let result: Vec<&str> = path.iter().map(|command| command.long_name()).collect();
        result.join(" ")
    }

    pub fn get_command_paths() -> BTreeSet<Vec<&'static SimplexCommand>> {
        let mut result = BTreeSet::new();
        Self::get_paths_recursive(&SIMPLEX_COMMANDS, &mut result, vec![]);
        result
    }

    fn get_paths_recursive(
        command: &'static SimplexCommand,
        result: &mut BTreeSet<Vec<&'static SimplexCommand>>,
        prefix: Vec<&'static SimplexCommand>,
    ) {
        let mut prefix = prefix;
        prefix.push(command);
        match command {
            SimplexCommand::Group { children, .. } => {
                for child in children.iter() {
                    Self::get_paths_recursive(child, result, prefix.clone());
                }
            }
            SimplexCommand::Command { .. } => {
                result.insert(prefix);
            }
        }
    }
}

impl Ord for SimplexCommand {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.long_name().cmp(other.long_name())
    }
}

impl PartialOrd for SimplexCommand {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SimplexCommand {
    fn eq(&self, other: &Self) -> bool {
        self.long_name() == other.long_name()
    }
}

impl Eq for SimplexCommand {}
