use indexmap::IndexMap;
use serde::Serialize;
use std::ops::Index;

use super::tableau::{Column, Tableau};

pub const UNIT_COLUMN_TOLERANCE: f64 = 1e-6;

/// The values of all decision and slack variables at an optimum, followed by the objective
/// value under `Z`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    values: IndexMap<Column, f64>,
}

impl Solution {
    pub fn get(&self, column: Column) -> Option<f64> {
        self.values.get(&column).copied()
    }

    pub fn objective(&self) -> f64 {
        self.values.get(&Column::Z).copied().unwrap_or(0.0)
    }

    /// The values of the decision variables `x1..xn`, in order.
    pub fn decision_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter(|(column, _)| column.is_decision())
            .map(|(_, value)| *value)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Column, &f64)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn write_text(&self, f: &mut dyn std::io::Write) -> anyhow::Result<()> {
        writeln!(f, "Optimal solution found")?;
        for (column, value) in &self.values {
            writeln!(f, "{}: {:.2}", column, value)?;
        }
        Ok(())
    }
}

impl Index<Column> for Solution {
    type Output = f64;

    fn index(&self, column: Column) -> &f64 {
        &self.values[&column]
    }
}

/// Reads a basic feasible solution off a reduced tableau.
///
/// A variable is basic if its column, over the constraint rows, is a unit vector within
/// [`UNIT_COLUMN_TOLERANCE`]; it then takes the right-hand side of the row holding the 1.
/// Every other variable is 0.
pub fn extract_solution(tableau: &Tableau) -> Solution {
    let rhs = tableau.rhs_index();
    let mut values = IndexMap::new();

    for (j, column) in tableau.columns().iter().enumerate() {
        if !column.is_variable() {
            continue;
        }

        let mut unit_row = None;
        let mut is_unit = true;
        for (i, row) in tableau.constraint_rows().enumerate() {
            let value = row[j];
            if (value - 1.0).abs() < UNIT_COLUMN_TOLERANCE {
                if unit_row.is_some() {
                    is_unit = false;
                    break;
                }
                unit_row = Some(i);
            } else if value.abs() > UNIT_COLUMN_TOLERANCE {
                is_unit = false;
                break;
            }
        }

        let value = match unit_row {
            Some(i) if is_unit => tableau.row(i)[rhs],
            _ => 0.0,
        };
        values.insert(*column, value);
    }

    values.insert(Column::Z, tableau.objective_value());
    Solution { values }
}
