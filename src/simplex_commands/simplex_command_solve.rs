use clap::{Arg, ArgAction, Command, value_parser};

use crate::{
    optimisation_algorithms::simplex::{DEFAULT_MAX_ITERATIONS, SolverOptions},
    simplex_framework::{
        simplex_command::SimplexCommand,
        simplex_output::{SimplexOutput, SimplexOutputType},
    },
};

pub const ARG_ID_MAX_ITERATIONS: &str = "max-iterations";
pub const ARG_ID_STRICT: &str = "strict";

pub const SIMPLEX_SOLVE: SimplexCommand = SimplexCommand::Command {
    name_short: "solve",
    name_long: None,
    explanation_short: "Maximise a linear program and show every tableau on the way.",
    explanation_long: Some(
        "Maximise a linear program with the primal simplex method, starting from the basis of slack variables.
        Every tableau is shown: the initial one, the one before each pivot with the pivot row and cell marked, and the final one.
        The solve ends with an optimal solution, with the detection of an unbounded objective, or when the maximum number of pivots is reached.
        Missing coefficients are taken as zero unless --strict is given.",
    ),
    cli_command: Some(cli_solver_options),
    input_names: &["FILE"],
    input_helps: &["The linear program, as a text (.lp) or JSON file. Use - to read from STDIN."],
    execute: |mut inputs, cli_matches| {
        let program = inputs.remove(0).into_linear_program();
        let options = solver_options(cli_matches);
        log::info!(
            "solving a linear program with {} variables and {} constraints",
            program.number_of_variables(),
            program.number_of_constraints()
        );

        let outcome = program.solve_with(&options)?;
        Ok(SimplexOutput::Outcome(outcome))
    },
    output_type: &SimplexOutputType::Outcome,
};

pub fn cli_solver_options(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ID_MAX_ITERATIONS)
                .long(ARG_ID_MAX_ITERATIONS)
                .action(ArgAction::Set)
                .value_name("NUMBER")
                .help("The maximum number of pivots.")
                .required(false)
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_MAX_ITERATIONS.to_string()),
        )
        .arg(
            Arg::new(ARG_ID_STRICT)
                .long(ARG_ID_STRICT)
                .action(ArgAction::SetTrue)
                .help("Refuse linear programs with missing coefficients, negative right-hand sides or non-finite numbers."),
        )
}

pub fn solver_options(cli_matches: Option<&clap::ArgMatches>) -> SolverOptions {
    let mut options = SolverOptions::default();
    if let Some(cli_matches) = cli_matches {
        if let Some(max_iterations) = cli_matches.get_one::<usize>(ARG_ID_MAX_ITERATIONS) {
            options = options.with_max_iterations(*max_iterations);
        }
        options = options.strict(cli_matches.get_flag(ARG_ID_STRICT));
    }
    options
}

#[cfg(test)]
mod tests {
    use crate::optimisation_algorithms::simplex::DEFAULT_MAX_ITERATIONS;

    use super::{SIMPLEX_SOLVE, solver_options};

    #[test]
    fn options_from_cli() {
        let matches = SIMPLEX_SOLVE
            .build_cli()
            .try_get_matches_from(["solve", "problem.lp", "--max-iterations", "3", "--strict"])
            .unwrap();
        let options = solver_options(Some(&matches));
        assert_eq!(options.max_iterations, 3);
        assert!(options.strict);
    }

    #[test]
    fn default_options() {
        let matches = SIMPLEX_SOLVE
            .build_cli()
            .try_get_matches_from(["solve", "problem.lp"])
            .unwrap();
        let options = solver_options(Some(&matches));
        assert_eq!(options.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert!(!options.strict);

        assert_eq!(solver_options(None).max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
