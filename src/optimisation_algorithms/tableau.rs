use anyhow::{Error, anyhow};
use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::Array1;
use serde::{Serialize, Serializer};
use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::Arc,
};

/// A column of a simplex tableau.
///
/// Decision and slack variables carry a zero-based index; they are displayed one-based
/// (`x1`, `s1`, ...). The derived order is the column order of every tableau: decision
/// variables, then slack variables, then `RHS`, then `Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Decision(usize),
    Slack(usize),
    Rhs,
    Z,
}

impl Column {
    /// Decision and slack columns are variables; `RHS` and `Z` are bookkeeping.
    pub fn is_variable(&self) -> bool {
        match self {
            Column::Decision(_) | Column::Slack(_) => true,
            Column::Rhs | Column::Z => false,
        }
    }

    pub fn is_decision(&self) -> bool {
        matches!(self, Column::Decision(_))
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Decision(k) => f.pad(&format!("x{}", k + 1)),
            Column::Slack(k) => f.pad(&format!("s{}", k + 1)),
            Column::Rhs => f.pad("RHS"),
            Column::Z => f.pad("Z"),
        }
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_index = |index: &str| match index.parse::<usize>() {
            Ok(k) if k >= 1 => Ok(k - 1),
            _ => Err(anyhow!("`{}` does not have a valid one-based index", s)),
        };

        if s == "RHS" {
            Ok(Column::Rhs)
        } else if s == "Z" {
            Ok(Column::Z)
        } else if let Some(index) = s.strip_prefix('x') {
            Ok(Column::Decision(parse_index(index)?))
        } else if let Some(index) = s.strip_prefix('s') {
            Ok(Column::Slack(parse_index(index)?))
        } else {
            Err(anyhow!("`{}` is not a column name", s))
        }
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A simplex tableau: `m` constraint rows followed by one objective row over a fixed,
/// shared column schema.
///
/// Rows are immutable once built. A pivot produces a new tableau; rows that the pivot does
/// not touch are shared with the previous tableau, so cloning a tableau is cheap and a clone
/// can never observe later pivots.
#[derive(Clone, Debug)]
pub struct Tableau {
    number_of_variables: usize,
    number_of_constraints: usize,
    columns: Arc<[Column]>,
    rows: Vec<Arc<Array1<f64>>>,
}

impl Tableau {
    /// Builds the initial tableau of `maximise c·x subject to Ax <= b, x >= 0`.
    ///
    /// Missing coefficients (short rows or vectors) are taken as zero and surplus ones are
    /// ignored; this never fails.
    pub fn initial(
        number_of_variables: usize,
        number_of_constraints: usize,
        objective: &[f64],
        constraints: &[Vec<f64>],
        rhs: &[f64],
    ) -> Self {
        let n = number_of_variables;
        let m = number_of_constraints;
        let columns = Self::schema(n, m);
        let width = columns.len();

        let mut rows = Vec::with_capacity(m + 1);
        for i in 0..m {
            let mut row = Array1::<f64>::zeros(width);
            let coefficients = constraints.get(i).map(|r| r.as_slice()).unwrap_or(&[]);
            for j in 0..n {
                row[j] = coefficients.get(j).copied().unwrap_or(0.0);
            }
            row[n + i] = 1.0;
            row[n + m] = rhs.get(i).copied().unwrap_or(0.0);
            rows.push(Arc::new(row));
        }

        //objective row: negated, so that optimality means no negative entries remain
        let mut objective_row = Array1::<f64>::zeros(width);
        for j in 0..n {
            objective_row[j] = 0.0 - objective.get(j).copied().unwrap_or(0.0);
        }
        objective_row[n + m + 1] = 1.0;
        rows.push(Arc::new(objective_row));

        log::trace!("built initial tableau with {} rows and {} columns", m + 1, width);

        Self {
            number_of_variables: n,
            number_of_constraints: m,
            columns,
            rows,
        }
    }

    fn schema(n: usize, m: usize) -> Arc<[Column]> {
        (0..n)
            .map(Column::Decision)
            .chain((0..m).map(Column::Slack))
            .chain([Column::Rhs, Column::Z])
            .collect()
    }

    /// Used by the row reducer: same schema, new rows.
    pub(crate) fn with_rows(&self, rows: Vec<Arc<Array1<f64>>>) -> Self {
        debug_assert_eq!(rows.len(), self.rows.len());
        Self {
            number_of_variables: self.number_of_variables,
            number_of_constraints: self.number_of_constraints,
            columns: Arc::clone(&self.columns),
            rows,
        }
    }

    pub fn number_of_variables(&self) -> usize {
        self.number_of_variables
    }

    pub fn number_of_constraints(&self) -> usize {
        self.number_of_constraints
    }

    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The decision and slack columns, in column order.
    pub fn variable_columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied().filter(Column::is_variable)
    }

    pub fn column_index(&self, column: Column) -> Option<usize> {
        let n = self.number_of_variables;
        let m = self.number_of_constraints;
        match column {
            Column::Decision(k) if k < n => Some(k),
            Column::Slack(k) if k < m => Some(n + k),
            Column::Decision(_) | Column::Slack(_) => None,
            Column::Rhs => Some(n + m),
            Column::Z => Some(n + m + 1),
        }
    }

    pub fn rhs_index(&self) -> usize {
        self.number_of_variables + self.number_of_constraints
    }

    pub fn row(&self, row: usize) -> &Array1<f64> {
        &self.rows[row]
    }

    pub(crate) fn shared_rows(&self) -> &[Arc<Array1<f64>>] {
        &self.rows
    }

    pub fn rows(&self) -> impl Iterator<Item = &Array1<f64>> {
        self.rows.iter().map(|row| &**row)
    }

    pub fn constraint_rows(&self) -> impl Iterator<Item = &Array1<f64>> {
        self.rows[..self.number_of_constraints].iter().map(|row| &**row)
    }

    pub fn objective_row(&self) -> &Array1<f64> {
        &self.rows[self.number_of_constraints]
    }

    pub fn objective_row_index(&self) -> usize {
        self.number_of_constraints
    }

    /// Returns the value at the given row and column, or `None` if either does not exist.
    pub fn get(&self, row: usize, column: Column) -> Option<f64> {
        let j = self.column_index(column)?;
        self.rows.get(row).map(|r| r[j])
    }

    /// The current value of the objective: the right-hand side of the objective row.
    pub fn objective_value(&self) -> f64 {
        self.objective_row()[self.rhs_index()]
    }

    /// The tableau as ordered rows of ordered column-to-value maps.
    pub fn to_row_maps(&self) -> Vec<IndexMap<Column, f64>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .copied()
                    .zip(row.iter().copied())
                    .collect()
            })
            .collect()
    }

    /// Writes the tableau as a table with two decimals. The pivot row, if any, is marked with
    /// `*` and the pivot cell is put in brackets.
    pub fn write_table(
        &self,
        f: &mut dyn std::io::Write,
        pivot_row: Option<usize>,
        pivot_column: Option<Column>,
    ) -> anyhow::Result<()> {
        let pivot_index = pivot_column.and_then(|c| self.column_index(c));

        writeln!(
            f,
            "  {}",
            self.columns.iter().map(|c| format!("{:>10}", c)).join("")
        )?;
        for (i, row) in self.rows.iter().enumerate() {
            let marker = if Some(i) == pivot_row { '*' } else { ' ' };
            let cells = row
                .iter()
                .enumerate()
                .map(|(j, value)| {
                    if Some(i) == pivot_row && Some(j) == pivot_index {
                        format!("{:>10}", format!("[{:.2}]", value))
                    } else {
                        format!("{:>10.2}", value)
                    }
                })
                .join("");
            writeln!(f, "{} {}", marker, cells)?;
        }
        Ok(())
    }
}

impl Serialize for Tableau {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_row_maps())
    }
}

impl Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = vec![];
        self.write_table(&mut buffer, None, None)
            .map_err(|_| fmt::Error)?;
        write!(f, "{}", String::from_utf8_lossy(&buffer))
    }
}
