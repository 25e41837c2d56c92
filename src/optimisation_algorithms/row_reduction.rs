use std::sync::Arc;

use ndarray::Array1;

use super::{pivot_selection::Pivot, tableau::Tableau};

/// Gauss-Jordan elimination around the pivot element.
///
/// The pivot row is divided by the pivot element; every other row then has its pivot-column
/// coefficient (as it was before this reduction) times the normalised pivot row subtracted
/// from it. All reads come from the input tableau, which is left untouched. Rows with a zero
/// coefficient in the pivot column are shared with the input.
///
/// The pivot element must be strictly positive, which the pivot selector guarantees.
pub fn reduce(tableau: &Tableau, pivot: &Pivot) -> Tableau {
    let rows = tableau.shared_rows();
    let pivot_element = rows[pivot.row][pivot.column_index];
    debug_assert!(pivot_element > 0.0, "pivot element {} is not positive", pivot_element);

    let normalised: Arc<Array1<f64>> = Arc::new(&*rows[pivot.row] / pivot_element);

    let new_rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if i == pivot.row {
                return Arc::clone(&normalised);
            }

            let factor = row[pivot.column_index];
            if factor == 0.0 {
                Arc::clone(row)
            } else {
                log::trace!("row {}: subtract {} times the pivot row", i + 1, factor);
                Arc::new(&**row - &(&*normalised * factor))
            }
        })
        .collect();

    tableau.with_rows(new_rows)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::optimisation_algorithms::{
        pivot_selection::{PivotDecision, select_pivot},
        row_reduction::reduce,
        tableau::{Column, Tableau},
    };

    fn pivot_once(tableau: &Tableau) -> (Tableau, usize, usize) {
        match select_pivot(tableau) {
            PivotDecision::Pivot(pivot) => (reduce(tableau, &pivot), pivot.row, pivot.column_index),
            other => panic!("expected a pivot, got {:?}", other),
        }
    }

    #[test]
    fn pivot_column_becomes_unit_vector() {
        let tableau = Tableau::initial(
            2,
            3,
            &[3.0, 5.0],
            &[vec![1.0, 0.0], vec![0.0, 2.0], vec![3.0, 2.0]],
            &[4.0, 12.0, 18.0],
        );
        let (reduced, pivot_row, pivot_column) = pivot_once(&tableau);

        for (i, row) in reduced.rows().enumerate() {
            let expected = if i == pivot_row { 1.0 } else { 0.0 };
            assert!((row[pivot_column] - expected).abs() < 1e-9);
        }

        //x2 enters at row 2 (ratio 6)
        assert_eq!(reduced.get(1, Column::Rhs), Some(6.0));
        assert_eq!(reduced.get(2, Column::Rhs), Some(6.0));
        assert_eq!(reduced.get(3, Column::Rhs), Some(30.0));
        assert_eq!(reduced.get(3, Column::Slack(1)), Some(2.5));
        assert_eq!(reduced.get(3, Column::Z), Some(1.0));
    }

    #[test]
    fn input_is_untouched() {
        let tableau = Tableau::initial(2, 1, &[3.0, 5.0], &[vec![1.0, 2.0]], &[10.0]);
        let before = tableau.to_row_maps();
        let _ = pivot_once(&tableau);
        assert_eq!(tableau.to_row_maps(), before);
    }

    #[test]
    fn rows_without_pivot_coefficient_are_shared() {
        let tableau = Tableau::initial(
            2,
            2,
            &[1.0, 0.0],
            &[vec![1.0, 0.0], vec![0.0, 1.0]],
            &[4.0, 3.0],
        );
        let (reduced, pivot_row, _) = pivot_once(&tableau);
        assert_eq!(pivot_row, 0);

        assert!(Arc::ptr_eq(&tableau.shared_rows()[1], &reduced.shared_rows()[1]));
        assert!(!Arc::ptr_eq(&tableau.shared_rows()[2], &reduced.shared_rows()[2]));
    }

    #[test]
    fn shape_is_preserved() {
        let tableau = Tableau::initial(
            3,
            2,
            &[1.0, 2.0, 3.0],
            &[vec![1.0, 1.0, 1.0], vec![2.0, 1.0, 3.0]],
            &[4.0, 6.0],
        );
        let (reduced, _, _) = pivot_once(&tableau);
        assert_eq!(reduced.number_of_rows(), 3);
        assert_eq!(reduced.columns(), tableau.columns());
    }
}
