pub mod optimisation_algorithms {
    pub mod simplex_error;
    pub mod tableau;
    pub mod pivot_selection;
    pub mod row_reduction;
    pub mod trace_recorder;
    pub mod solution_extraction;
    pub mod simplex;
}
pub mod simplex_framework {
    pub mod simplex_command;
    pub mod simplex_file_handler;
    pub mod simplex_input;
    pub mod simplex_output;
    pub mod exportable;
    pub mod importable;
    pub mod infoable;
}
pub mod simplex_commands {
    pub mod simplex_command_convert;
    pub mod simplex_command_info;
    pub mod simplex_command_solve;
    pub mod simplex_command_validate;
}
pub mod simplex_objects {
    pub mod linear_program;
    pub mod simplex_trace;
}
pub mod input_reader;
pub mod json;
pub mod line_reader;

pub use optimisation_algorithms::simplex::{SimplexOutcome, SimplexState, SolverOptions, solve};
