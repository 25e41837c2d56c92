use logging_timer::time;
use serde::Serialize;
use strum::EnumMessage;
use strum_macros::{Display, EnumIter, EnumMessage};

use super::{
    pivot_selection::{PivotDecision, select_pivot},
    row_reduction::reduce,
    solution_extraction::{Solution, extract_solution},
    tableau::Tableau,
    trace_recorder::{IterationRecord, TraceRecorder},
};

pub const DEFAULT_MAX_ITERATIONS: usize = 50;
pub const INITIAL_TABLEAU_MESSAGE: &str = "Initial Tableau";

/**
 * The states of a solve. A solve starts in `Building`, moves to `Iterating` once the initial
 * tableau exists, and ends in one of the three terminal states, each of which carries the
 * message of the final iteration record.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, EnumMessage, Serialize)]
pub enum SimplexState {
    Building,
    Iterating,
    #[strum(message = "Optimal solution found.")]
    Optimal,
    #[strum(message = "Unbounded solution.")]
    Unbounded,
    #[strum(message = "Max iterations reached.")]
    IterationLimitReached,
}

impl SimplexState {
    pub fn is_terminal(&self) -> bool {
        self.terminal_message().is_some()
    }

    pub fn terminal_message(&self) -> Option<&'static str> {
        self.get_message()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverOptions {
    /// The maximum number of pivots before the solve gives up.
    pub max_iterations: usize,

    /// Reject problems whose vectors do not match the declared dimensions instead of
    /// zero-padding them.
    pub strict: bool,
}

impl SolverOptions {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            strict: false,
        }
    }
}

/// The result of a solve: the complete trace, the terminal state and, only if that state is
/// `Optimal`, the solution.
#[derive(Clone, Debug, Serialize)]
pub struct SimplexOutcome {
    #[serde(rename = "status")]
    state: SimplexState,
    iterations: Vec<IterationRecord>,
    solution: Option<Solution>,
}

impl SimplexOutcome {
    pub fn state(&self) -> SimplexState {
        self.state
    }

    pub fn iterations(&self) -> &[IterationRecord] {
        &self.iterations
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// The number of pivots that were applied.
    pub fn number_of_pivots(&self) -> usize {
        self.iterations
            .iter()
            .filter(|record| record.pivot_row().is_some())
            .count()
    }

    pub fn final_tableau(&self) -> Option<&Tableau> {
        self.iterations.last().map(|record| record.tableau())
    }

    pub fn into_parts(self) -> (Vec<IterationRecord>, Option<Solution>) {
        (self.iterations, self.solution)
    }
}

/// Solves `maximise c·x subject to Ax <= b, x >= 0` from the slack basis.
///
/// Missing matrix or vector entries are taken as zero. The outcome is never an error:
/// unboundedness and running out of iterations are terminal states of the trace.
pub fn solve(
    number_of_variables: usize,
    number_of_constraints: usize,
    objective: &[f64],
    constraints: &[Vec<f64>],
    rhs: &[f64],
) -> SimplexOutcome {
    let tableau = Tableau::initial(
        number_of_variables,
        number_of_constraints,
        objective,
        constraints,
        rhs,
    );
    solve_tableau(tableau, &SolverOptions::default())
}

/// Runs the simplex iterations on a prepared initial tableau.
#[time("debug")]
pub fn solve_tableau(initial: Tableau, options: &SolverOptions) -> SimplexOutcome {
    let mut recorder = TraceRecorder::new();
    let mut tableau = initial;
    recorder.record(&tableau, INITIAL_TABLEAU_MESSAGE, None);

    let mut state = SimplexState::Iterating;
    let mut pivots = 0;
    while !state.is_terminal() {
        //the cap takes precedence: a tableau reached by the last allowed pivot is not inspected
        if pivots >= options.max_iterations {
            log::warn!(
                "stopped after {} pivots; the problem may be cycling",
                pivots
            );
            state = SimplexState::IterationLimitReached;
            break;
        }

        match select_pivot(&tableau) {
            PivotDecision::Optimal => {
                state = SimplexState::Optimal;
            }
            PivotDecision::Unbounded { column } => {
                log::info!("column {} can increase without bound", column);
                state = SimplexState::Unbounded;
            }
            PivotDecision::Pivot(pivot) => {
                pivots += 1;
                if pivot.is_degenerate() {
                    log::warn!("degenerate pivot on {} in row {}", pivot.column, pivot.row + 1);
                }
                log::debug!("{} (ratio {})", pivot, pivot.ratio);

                recorder.record(&tableau, pivot.to_string(), Some(&pivot));
                tableau = reduce(&tableau, &pivot);
            }
        }
    }

    if let Some(message) = state.terminal_message() {
        recorder.record(&tableau, message, None);
    }

    let solution = if state == SimplexState::Optimal {
        Some(extract_solution(&tableau))
    } else {
        None
    };

    log::info!("{} after {} pivots", state, pivots);

    SimplexOutcome {
        state,
        iterations: recorder.into_records(),
        solution,
    }
}
