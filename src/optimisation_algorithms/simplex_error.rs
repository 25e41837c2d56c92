use thiserror::Error;

/// Problems that make a linear program unsuitable for the slack-basis simplex method.
///
/// The lenient solve path never produces these: it zero-pads whatever it is given. They are
/// reported by [`crate::simplex_objects::linear_program::LinearProgram::validate`] and by a
/// strict solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimplexError {
    #[error("invalid dimensions: {what} has {found} entries, where {expected} were expected")]
    InvalidDimensions {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("a linear program needs at least one decision variable")]
    NoVariables,

    #[error("a linear program needs at least one constraint")]
    NoConstraints,

    #[error(
        "constraint {constraint} has right-hand side {value}, which is negative; the slack basis is not feasible"
    )]
    NegativeRightHandSide { constraint: usize, value: f64 },

    #[error("{what} is not a finite number")]
    NotFinite { what: String },
}
