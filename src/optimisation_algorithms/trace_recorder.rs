use serde::Serialize;

use super::{
    pivot_selection::Pivot,
    tableau::{Column, Tableau},
};

/// One step of the audit trail of a solve.
#[derive(Clone, Debug, Serialize)]
pub struct IterationRecord {
    sequence: usize,
    tableau: Tableau,
    #[serde(skip_serializing_if = "Option::is_none")]
    pivot_row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pivot_column: Option<Column>,
    message: String,
}

impl IterationRecord {
    /// One-based position in the trace.
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Zero-based index of the pivot row, for records that announce a pivot.
    pub fn pivot_row(&self) -> Option<usize> {
        self.pivot_row
    }

    pub fn pivot_column(&self) -> Option<Column> {
        self.pivot_column
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn write_text(&self, f: &mut dyn std::io::Write) -> anyhow::Result<()> {
        writeln!(f, "Iteration {}: {}", self.sequence, self.message)?;
        self.tableau
            .write_table(f, self.pivot_row, self.pivot_column)
    }
}

/// Append-only log of iteration records.
///
/// A record holds its own snapshot of the tableau. Tableau rows are never changed after
/// construction, so a snapshot keeps its values whatever happens to the live tableau.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    records: Vec<IterationRecord>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        tableau: &Tableau,
        message: impl Into<String>,
        pivot: Option<&Pivot>,
    ) -> &IterationRecord {
        let record = IterationRecord {
            sequence: self.records.len() + 1,
            tableau: tableau.clone(),
            pivot_row: pivot.map(|p| p.row),
            pivot_column: pivot.map(|p| p.column),
            message: message.into(),
        };
        log::debug!("iteration {}: {}", record.sequence, record.message);
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<IterationRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use crate::optimisation_algorithms::{
        pivot_selection::{PivotDecision, select_pivot},
        row_reduction::reduce,
        tableau::{Column, Tableau},
        trace_recorder::TraceRecorder,
    };

    #[test]
    fn sequence_numbers_are_one_based_and_consecutive() {
        let tableau = Tableau::initial(1, 1, &[1.0], &[vec![1.0]], &[1.0]);
        let mut recorder = TraceRecorder::new();
        assert!(recorder.is_empty());

        recorder.record(&tableau, "first", None);
        recorder.record(&tableau, "second", None);
        recorder.record(&tableau, "third", None);

        let sequences: Vec<usize> = recorder.records().iter().map(|r| r.sequence()).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(recorder.records()[1].message(), "second");
    }

    #[test]
    fn snapshots_do_not_follow_the_live_tableau() {
        let mut tableau = Tableau::initial(2, 1, &[3.0, 5.0], &[vec![1.0, 2.0]], &[10.0]);
        let mut recorder = TraceRecorder::new();
        recorder.record(&tableau, "Initial Tableau", None);

        if let PivotDecision::Pivot(pivot) = select_pivot(&tableau) {
            let record = recorder.record(&tableau, pivot.to_string(), Some(&pivot));
            assert_eq!(record.pivot_row(), Some(0));
            assert_eq!(record.pivot_column(), Some(Column::Decision(1)));
            tableau = reduce(&tableau, &pivot);
        } else {
            panic!("expected a pivot");
        }

        assert_eq!(tableau.get(0, Column::Rhs), Some(5.0));
        let initial = recorder.records()[0].tableau();
        assert_eq!(initial.get(0, Column::Rhs), Some(10.0));
        assert_eq!(initial.get(1, Column::Decision(1)), Some(-5.0));
        assert_eq!(recorder.records()[1].tableau().get(0, Column::Rhs), Some(10.0));
    }

    #[test]
    fn text_marks_the_pivot() {
        let tableau = Tableau::initial(2, 1, &[3.0, 5.0], &[vec![1.0, 2.0]], &[10.0]);
        let mut recorder = TraceRecorder::new();
        if let PivotDecision::Pivot(pivot) = select_pivot(&tableau) {
            recorder.record(&tableau, pivot.to_string(), Some(&pivot));
        }

        let mut f = vec![];
        recorder.records()[0].write_text(&mut f).unwrap();
        let text = String::from_utf8(f).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Iteration 1: Pivot Column: x2, Pivot Row: 1");
        assert!(lines[1].contains("x1") && lines[1].contains("RHS"));
        assert!(lines[2].starts_with('*'));
        assert!(lines[2].contains("[2.00]"));
        assert!(lines[3].starts_with(' '));
        assert!(lines[3].contains("-5.00"));
    }
}
