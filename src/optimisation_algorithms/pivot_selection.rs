use std::fmt::{self, Display};

use super::tableau::{Column, Tableau};

/// A chosen pivot: the leaving (constraint) row and the entering column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pivot {
    pub row: usize,
    pub column: Column,
    pub(crate) column_index: usize,
    pub ratio: f64,
}

impl Pivot {
    /// A pivot with a zero minimum ratio does not improve the objective and may cycle.
    pub fn is_degenerate(&self) -> bool {
        self.ratio == 0.0
    }
}

impl Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pivot Column: {}, Pivot Row: {}", self.column, self.row + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PivotDecision {
    Pivot(Pivot),

    /// No objective coefficient is negative.
    Optimal,

    /// The entering column has no strictly positive coefficient in any constraint row.
    Unbounded { column: Column },
}

/// Dantzig's rule: the variable column with the most negative objective coefficient.
/// Ties go to the first such column in column order. Returns `None` if no coefficient is
/// negative.
pub fn select_entering_column(tableau: &Tableau) -> Option<(Column, usize)> {
    let objective_row = tableau.objective_row();
    let mut result = None;
    let mut minimum = 0.0;
    for (j, column) in tableau.columns().iter().enumerate() {
        if !column.is_variable() {
            continue;
        }
        if objective_row[j] < minimum {
            minimum = objective_row[j];
            result = Some((*column, j));
        }
    }
    result
}

/// Minimum-ratio test on the given column index. Only constraint rows with a strictly
/// positive coefficient take part; the lowest row index wins ties. Returns the row and its
/// ratio, or `None` if no row qualifies.
pub fn select_leaving_row(tableau: &Tableau, column_index: usize) -> Option<(usize, f64)> {
    let rhs = tableau.rhs_index();
    let mut result = None;
    let mut minimum = f64::INFINITY;
    for (i, row) in tableau.constraint_rows().enumerate() {
        let coefficient = row[column_index];
        if coefficient > 0.0 {
            let ratio = row[rhs] / coefficient;
            if ratio >= 0.0 && ratio < minimum {
                minimum = ratio;
                result = Some((i, ratio));
            }
        }
    }
    result
}

pub fn select_pivot(tableau: &Tableau) -> PivotDecision {
    let Some((column, column_index)) = select_entering_column(tableau) else {
        return PivotDecision::Optimal;
    };

    match select_leaving_row(tableau, column_index) {
        Some((row, ratio)) => PivotDecision::Pivot(Pivot {
            row,
            column,
            column_index,
            ratio,
        }),
        None => PivotDecision::Unbounded { column },
    }
}
