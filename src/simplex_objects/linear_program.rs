use anyhow::{Context, Result, anyhow};
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use std::{
    fmt::{self, Display},
    io::{BufRead, Write},
};

use crate::{
    json,
    line_reader::LineReader,
    optimisation_algorithms::{
        simplex::{SimplexOutcome, SolverOptions, solve_tableau},
        simplex_error::SimplexError,
        tableau::{Column, Tableau},
    },
    simplex_framework::{
        exportable::Exportable, importable::Importable, infoable::Infoable,
        simplex_file_handler::SimplexFileHandler,
    },
};

pub const HEADER: &str = "linear program";

pub const FORMAT_SPECIFICATION: &str = "A linear program is a line-based structure. Lines starting with a # are ignored.
    This first line is exactly `linear program'.
    The second line is the number of decision variables n.
    The third line is the number of constraints m.
    The fourth line holds the n objective coefficients, separated by whitespace.
    Then, m lines follow, each with the n coefficients of a constraint followed by its right-hand side.
    The program maximises the objective subject to every constraint being at most its right-hand side, with all variables non-negative.

    For instance:
    linear program
    # number of variables
    2
    # number of constraints
    1
    # objective
    3 5
    # constraints
    1 2 10";

pub const JSON_FORMAT_SPECIFICATION: &str = "A JSON linear program is an object with the fields `objective' (a list of numbers), `constraints' (a list of lists of numbers) and `rhs' (a list of numbers).
    The optional fields `number_of_variables' and `number_of_constraints' override the sizes that are otherwise taken from the lengths of `objective' and `rhs'.

    For instance:
    {\"objective\": [3, 5], \"constraints\": [[1, 2]], \"rhs\": [10]}";

pub const SIMPLEX_LINEAR_PROGRAM: SimplexFileHandler = SimplexFileHandler {
    name: "linear program",
    article: "a",
    file_extension: "lp",
    format_specification: FORMAT_SPECIFICATION,
    importer: <LinearProgram as Importable>::import,
};

pub const SIMPLEX_LINEAR_PROGRAM_JSON: SimplexFileHandler = SimplexFileHandler {
    name: "JSON linear program",
    article: "a",
    file_extension: "json",
    format_specification: JSON_FORMAT_SPECIFICATION,
    importer: LinearProgram::import_json,
};

pub const DEFAULT_NUMBER_OF_VARIABLES: usize = 2;
pub const DEFAULT_NUMBER_OF_CONSTRAINTS: usize = 1;

/// `maximise objective·x subject to constraints·x <= rhs, x >= 0`.
///
/// The vectors are kept exactly as given, so that dimension problems can be reported by
/// [`LinearProgram::validate`]; solving pads them with zeroes unless a strict solve is asked
/// for.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinearProgram {
    number_of_variables: usize,
    number_of_constraints: usize,
    objective: Vec<f64>,
    constraints: Vec<Vec<f64>>,
    rhs: Vec<f64>,
}

impl LinearProgram {
    pub fn new(
        number_of_variables: usize,
        number_of_constraints: usize,
        objective: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        rhs: Vec<f64>,
    ) -> Self {
        Self {
            number_of_variables,
            number_of_constraints,
            objective,
            constraints,
            rhs,
        }
    }

    /// An all-zero program of the given size.
    pub fn zero(number_of_variables: usize, number_of_constraints: usize) -> Self {
        Self {
            number_of_variables,
            number_of_constraints,
            objective: vec![0.0; number_of_variables],
            constraints: vec![vec![0.0; number_of_variables]; number_of_constraints],
            rhs: vec![0.0; number_of_constraints],
        }
    }

    pub fn number_of_variables(&self) -> usize {
        self.number_of_variables
    }

    pub fn number_of_constraints(&self) -> usize {
        self.number_of_constraints
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Vec<f64>] {
        &self.constraints
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /**
     * Changes the number of variables and constraints. Every coefficient that exists in both
     * the old and the new size is kept; new coefficients are zero.
     */
    pub fn resize(
        &mut self,
        number_of_variables: usize,
        number_of_constraints: usize,
    ) -> Result<(), SimplexError> {
        if number_of_variables == 0 {
            return Err(SimplexError::NoVariables);
        }
        if number_of_constraints == 0 {
            return Err(SimplexError::NoConstraints);
        }

        self.objective.resize(number_of_variables, 0.0);
        self.constraints
            .resize(number_of_constraints, vec![0.0; number_of_variables]);
        for row in self.constraints.iter_mut() {
            row.resize(number_of_variables, 0.0);
        }
        self.rhs.resize(number_of_constraints, 0.0);

        log::debug!(
            "resized linear program from {}x{} to {}x{}",
            self.number_of_variables,
            self.number_of_constraints,
            number_of_variables,
            number_of_constraints
        );
        self.number_of_variables = number_of_variables;
        self.number_of_constraints = number_of_constraints;
        Ok(())
    }

    pub fn set_objective_coefficient(&mut self, variable: usize, value: f64) -> Result<()> {
        if variable >= self.number_of_variables {
            return Err(anyhow!(
                "variable {} does not exist; there are {} variables",
                variable + 1,
                self.number_of_variables
            ));
        }
        if self.objective.len() <= variable {
            self.objective.resize(variable + 1, 0.0);
        }
        self.objective[variable] = value;
        Ok(())
    }

    pub fn set_constraint_coefficient(
        &mut self,
        constraint: usize,
        variable: usize,
        value: f64,
    ) -> Result<()> {
        if constraint >= self.number_of_constraints {
            return Err(anyhow!(
                "constraint {} does not exist; there are {} constraints",
                constraint + 1,
                self.number_of_constraints
            ));
        }
        if variable >= self.number_of_variables {
            return Err(anyhow!(
                "variable {} does not exist; there are {} variables",
                variable + 1,
                self.number_of_variables
            ));
        }
        if self.constraints.len() <= constraint {
            self.constraints.resize(constraint + 1, vec![]);
        }
        let row = &mut self.constraints[constraint];
        if row.len() <= variable {
            row.resize(variable + 1, 0.0);
        }
        row[variable] = value;
        Ok(())
    }

    pub fn set_right_hand_side(&mut self, constraint: usize, value: f64) -> Result<()> {
        if constraint >= self.number_of_constraints {
            return Err(anyhow!(
                "constraint {} does not exist; there are {} constraints",
                constraint + 1,
                self.number_of_constraints
            ));
        }
        if self.rhs.len() <= constraint {
            self.rhs.resize(constraint + 1, 0.0);
        }
        self.rhs[constraint] = value;
        Ok(())
    }

    /**
     * Checks that the program can be solved from the slack basis as given: at least one
     * variable and constraint, vectors that match the declared sizes, finite numbers and
     * non-negative right-hand sides.
     */
    pub fn validate(&self) -> Result<(), SimplexError> {
        let n = self.number_of_variables;
        let m = self.number_of_constraints;
        if n == 0 {
            return Err(SimplexError::NoVariables);
        }
        if m == 0 {
            return Err(SimplexError::NoConstraints);
        }

        Self::check_length("the objective", n, self.objective.len())?;
        Self::check_length("the list of constraints", m, self.constraints.len())?;
        for (i, row) in self.constraints.iter().enumerate() {
            Self::check_length(&format!("constraint {}", i + 1), n, row.len())?;
        }
        Self::check_length("the right-hand side", m, self.rhs.len())?;

        for (j, value) in self.objective.iter().enumerate() {
            Self::check_finite(*value, || format!("objective coefficient {}", j + 1))?;
        }
        for (i, row) in self.constraints.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                Self::check_finite(*value, || {
                    format!("coefficient {} of constraint {}", j + 1, i + 1)
                })?;
            }
        }
        for (i, value) in self.rhs.iter().enumerate() {
            Self::check_finite(*value, || format!("right-hand side {}", i + 1))?;
            if *value < 0.0 {
                return Err(SimplexError::NegativeRightHandSide {
                    constraint: i + 1,
                    value: *value,
                });
            }
        }
        Ok(())
    }

    fn check_length(what: &str, expected: usize, found: usize) -> Result<(), SimplexError> {
        if expected == found {
            Ok(())
        } else {
            Err(SimplexError::InvalidDimensions {
                what: what.to_string(),
                expected,
                found,
            })
        }
    }

    fn check_finite(value: f64, what: impl FnOnce() -> String) -> Result<(), SimplexError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(SimplexError::NotFinite { what: what() })
        }
    }

    pub fn initial_tableau(&self) -> Tableau {
        Tableau::initial(
            self.number_of_variables,
            self.number_of_constraints,
            &self.objective,
            &self.constraints,
            &self.rhs,
        )
    }

    /// Solves with the default options; missing coefficients are taken as zero.
    pub fn solve(&self) -> SimplexOutcome {
        solve_tableau(self.initial_tableau(), &SolverOptions::default())
    }

    pub fn solve_with(&self, options: &SolverOptions) -> Result<SimplexOutcome, SimplexError> {
        if options.strict {
            self.validate()?;
        }
        Ok(solve_tableau(self.initial_tableau(), options))
    }

    pub fn import_json(reader: &mut dyn BufRead) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader).context("parsing JSON")?;
        if !value.is_object() {
            return Err(anyhow!("a JSON linear program must be an object"));
        }

        let objective = json::read_field_reals(&value, "objective")?;
        let constraints = json::read_field_matrix(&value, "constraints")?;
        let rhs = json::read_field_reals(&value, "rhs")?;

        let number_of_variables = json::read_field_number_optional(&value, "number_of_variables")
            .context("reading field `number_of_variables`")?
            .unwrap_or(objective.len());
        let number_of_constraints =
            json::read_field_number_optional(&value, "number_of_constraints")
                .context("reading field `number_of_constraints`")?
                .unwrap_or(rhs.len());

        Ok(Self::new(
            number_of_variables,
            number_of_constraints,
            objective,
            constraints,
            rhs,
        ))
    }

    /// The values, followed by zeroes up to `length` if there are fewer.
    fn padded(values: &[f64], length: usize) -> impl Iterator<Item = f64> + '_ {
        values
            .iter()
            .copied()
            .chain(std::iter::repeat(0.0))
            .take(values.len().max(length))
    }

    /// Writes a linear combination such as `3 x1 - 2 x2`, leaving out zero terms.
    fn linear_expression(coefficients: &[f64], number_of_variables: usize) -> String {
        let terms = (0..number_of_variables)
            .filter_map(|j| {
                let value = coefficients.get(j).copied().unwrap_or(0.0);
                (value != 0.0).then(|| (value, Column::Decision(j)))
            })
            .collect::<Vec<_>>();

        if terms.is_empty() {
            return "0".to_string();
        }

        let mut result = String::new();
        for (i, (value, column)) in terms.into_iter().enumerate() {
            let sign = if value < 0.0 { "-" } else { "+" };
            match (i, value.abs() == 1.0) {
                (0, true) if value < 0.0 => result.push_str(&format!("-{}", column)),
                (0, true) => result.push_str(&column.to_string()),
                (0, false) => result.push_str(&format!("{} {}", value, column)),
                (_, true) => result.push_str(&format!(" {} {}", sign, column)),
                (_, false) => result.push_str(&format!(" {} {} {}", sign, value.abs(), column)),
            }
        }
        result
    }
}

impl Default for LinearProgram {
    fn default() -> Self {
        Self::zero(DEFAULT_NUMBER_OF_VARIABLES, DEFAULT_NUMBER_OF_CONSTRAINTS)
    }
}

impl Importable for LinearProgram {
    fn import(reader: &mut dyn BufRead) -> Result<Self> {
        let mut lreader = LineReader::new(reader);

        let head = lreader
            .next_line_string()
            .with_context(|| format!("failed to read header, which should be `{}`", HEADER))?;
        if head.trim() != HEADER {
            return Err(anyhow!(
                "first line should be exactly `{}`, but found `{}` on line `{}`",
                HEADER,
                head,
                lreader.get_last_line_number()
            ));
        }

        let number_of_variables = lreader
            .next_line_index()
            .context("could not read the number of variables")?;
        let number_of_constraints = lreader
            .next_line_index()
            .context("could not read the number of constraints")?;

        let objective = lreader
            .next_line_numbers(None)
            .context("could not read the objective")?;

        //the count is not trusted for allocation; a short file fails on its missing lines
        let mut constraints = vec![];
        let mut rhs = vec![];
        for i in 0..number_of_constraints {
            let mut values = lreader
                .next_line_numbers(None)
                .with_context(|| format!("could not read constraint {}", i + 1))?;
            //the last number is the right-hand side
            match values.pop() {
                Some(b) => rhs.push(b),
                None => rhs.push(0.0),
            }
            constraints.push(values);
        }

        Ok(Self::new(
            number_of_variables,
            number_of_constraints,
            objective,
            constraints,
            rhs,
        ))
    }
}

impl Display for LinearProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        writeln!(f, "# number of variables\n{}", self.number_of_variables)?;
        writeln!(f, "# number of constraints\n{}", self.number_of_constraints)?;
        writeln!(f, "# objective")?;
        writeln!(
            f,
            "{}",
            Self::padded(&self.objective, self.number_of_variables).join(" ")
        )?;
        for i in 0..self.number_of_constraints {
            writeln!(f, "# constraint {}", i + 1)?;
            let row = self.constraints.get(i).map(|r| r.as_slice()).unwrap_or(&[]);
            let b = self.rhs.get(i).copied().unwrap_or(0.0);
            writeln!(
                f,
                "{}",
                Self::padded(row, self.number_of_variables)
                    .chain([b])
                    .join(" ")
            )?;
        }
        Ok(())
    }
}

impl Exportable for LinearProgram {
    fn export(&self, f: &mut dyn Write) -> Result<()> {
        Ok(write!(f, "{}", self)?)
    }

    fn export_json(&self, f: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *f, self)?;
        Ok(writeln!(f)?)
    }
}

impl Infoable for LinearProgram {
    fn info(&self, f: &mut impl Write) -> Result<()> {
        let n = self.number_of_variables;
        writeln!(f, "Number of variables\t{}", n)?;
        writeln!(f, "Number of constraints\t{}", self.number_of_constraints)?;
        writeln!(f)?;

        writeln!(f, "maximise Z = {}", Self::linear_expression(&self.objective, n))?;
        writeln!(f, "subject to")?;
        for i in 0..self.number_of_constraints {
            let row = self.constraints.get(i).map(|r| r.as_slice()).unwrap_or(&[]);
            let b = self.rhs.get(i).copied().unwrap_or(0.0);
            writeln!(f, "\t{} <= {}", Self::linear_expression(row, n), b)?;
        }
        if n > 0 {
            writeln!(
                f,
                "\t{} >= 0",
                (0..n).map(|j| Column::Decision(j).to_string()).join(", ")
            )?;
        }

        match self.validate() {
            Ok(()) => writeln!(f, "\nThe linear program is valid.")?,
            Err(e) => writeln!(f, "\nThe linear program is not valid: {}.", e)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{
        optimisation_algorithms::{
            simplex::{SimplexState, SolverOptions},
            simplex_error::SimplexError,
            tableau::Column,
        },
        simplex_framework::{exportable::Exportable, importable::Importable, infoable::Infoable},
    };

    use super::LinearProgram;

    #[test]
    fn import_text() {
        let fin = fs::read_to_string("testfiles/textbook.lp").unwrap();
        let program = LinearProgram::import(&mut fin.as_bytes()).unwrap();

        assert_eq!(program.number_of_variables(), 2);
        assert_eq!(program.number_of_constraints(), 3);
        assert_eq!(program.objective(), &[3.0, 5.0]);
        assert_eq!(program.constraints()[2], vec![3.0, 2.0]);
        assert_eq!(program.rhs(), &[4.0, 12.0, 18.0]);
        assert!(program.validate().is_ok());
    }

    #[test]
    fn import_json() {
        let fin = fs::read_to_string("testfiles/textbook.json").unwrap();
        let program = LinearProgram::import_json(&mut fin.as_bytes()).unwrap();

        let fin = fs::read_to_string("testfiles/textbook.lp").unwrap();
        let from_text = LinearProgram::import(&mut fin.as_bytes()).unwrap();
        assert_eq!(program, from_text);
    }

    #[test]
    fn text_round_trip() {
        let fin = fs::read_to_string("testfiles/textbook.lp").unwrap();
        let program = LinearProgram::import(&mut fin.as_bytes()).unwrap();

        let mut f = vec![];
        program.export(&mut f).unwrap();
        let again = LinearProgram::import(&mut f.as_slice()).unwrap();
        assert_eq!(program, again);
    }

    #[test]
    fn json_round_trip() {
        let program = LinearProgram::new(2, 1, vec![3.0, 5.0], vec![vec![1.0, 2.0]], vec![10.0]);
        let mut f = vec![];
        program.export_json(&mut f).unwrap();
        let again = LinearProgram::import_json(&mut f.as_slice()).unwrap();
        assert_eq!(program, again);
    }

    #[test]
    fn short_rows_are_padded_when_solving() {
        let fin = fs::read_to_string("testfiles/short-rows-invalid.lp").unwrap();
        let program = LinearProgram::import(&mut fin.as_bytes()).unwrap();

        assert!(matches!(
            program.validate(),
            Err(SimplexError::InvalidDimensions { .. })
        ));

        let outcome = program.solve();
        assert_eq!(outcome.state(), SimplexState::Optimal);

        let strict = SolverOptions::default().strict(true);
        assert!(matches!(
            program.solve_with(&strict),
            Err(SimplexError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn missing_rows_are_written_as_zeroes() {
        let mut input = "{\"objective\": [1], \"constraints\": [], \"rhs\": [5]}".as_bytes();
        let program = LinearProgram::import_json(&mut input).unwrap();
        assert_eq!(program.number_of_constraints(), 1);

        let mut f = vec![];
        program.export(&mut f).unwrap();
        let again = LinearProgram::import(&mut f.as_slice()).unwrap();

        assert_eq!(again.number_of_variables(), 1);
        assert_eq!(again.number_of_constraints(), 1);
        assert_eq!(again.constraints(), &[vec![0.0]]);
        assert_eq!(again.rhs(), &[5.0]);
        assert!(again.validate().is_ok());
    }

    #[test]
    fn short_vectors_are_padded_on_export() {
        let program = LinearProgram::new(
            3,
            3,
            vec![2.0],
            vec![vec![1.0, 2.0]],
            vec![4.0, 6.0],
        );

        let mut f = vec![];
        program.export(&mut f).unwrap();
        let again = LinearProgram::import(&mut f.as_slice()).unwrap();

        assert_eq!(again.objective(), &[2.0, 0.0, 0.0]);
        assert_eq!(
            again.constraints(),
            &[vec![1.0, 2.0, 0.0], vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0]]
        );
        assert_eq!(again.rhs(), &[4.0, 6.0, 0.0]);
        assert_eq!(
            again.solve().final_tableau().unwrap().objective_value(),
            program.solve().final_tableau().unwrap().objective_value()
        );
    }

    #[test]
    fn huge_constraint_count_is_an_error() {
        let mut input = "linear program\n1\n18446744073709551615\n1\n1 1\n".as_bytes();
        let result = LinearProgram::import(&mut input);
        assert!(result.is_err());
    }

    #[test]
    fn header_is_required() {
        let mut input = "linear programme\n1\n1\n1\n1 1\n".as_bytes();
        assert!(LinearProgram::import(&mut input).is_err());
    }

    #[test]
    fn missing_constraint_line() {
        let mut input = "linear program\n1\n2\n1\n1 1\n".as_bytes();
        assert!(LinearProgram::import(&mut input).is_err());
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            LinearProgram::zero(0, 1).validate(),
            Err(SimplexError::NoVariables)
        );
        assert_eq!(
            LinearProgram::zero(1, 0).validate(),
            Err(SimplexError::NoConstraints)
        );

        let program = LinearProgram::new(1, 1, vec![1.0], vec![vec![1.0]], vec![-1.0]);
        assert_eq!(
            program.validate(),
            Err(SimplexError::NegativeRightHandSide {
                constraint: 1,
                value: -1.0
            })
        );

        let program = LinearProgram::new(1, 1, vec![f64::NAN], vec![vec![1.0]], vec![1.0]);
        assert!(matches!(program.validate(), Err(SimplexError::NotFinite { .. })));

        let program = LinearProgram::new(
            2,
            1,
            vec![1.0, 1.0],
            vec![vec![1.0, 1.0, 1.0]],
            vec![1.0],
        );
        assert_eq!(
            program.validate(),
            Err(SimplexError::InvalidDimensions {
                what: "constraint 1".to_string(),
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn default_is_blank_two_by_one() {
        let program = LinearProgram::default();
        assert_eq!(program.number_of_variables(), 2);
        assert_eq!(program.number_of_constraints(), 1);
        assert_eq!(program.objective(), &[0.0, 0.0]);
        assert_eq!(program.constraints(), &[vec![0.0, 0.0]]);
        assert_eq!(program.rhs(), &[0.0]);
        assert!(program.validate().is_ok());
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut program = LinearProgram::new(
            2,
            2,
            vec![3.0, 5.0],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![10.0, 20.0],
        );

        program.resize(3, 1).unwrap();
        assert_eq!(program.objective(), &[3.0, 5.0, 0.0]);
        assert_eq!(program.constraints(), &[vec![1.0, 2.0, 0.0]]);
        assert_eq!(program.rhs(), &[10.0]);

        program.resize(1, 2).unwrap();
        assert_eq!(program.objective(), &[3.0]);
        assert_eq!(program.constraints(), &[vec![1.0], vec![0.0]]);
        assert_eq!(program.rhs(), &[10.0, 0.0]);
        assert!(program.validate().is_ok());

        assert_eq!(program.resize(0, 1), Err(SimplexError::NoVariables));
        assert_eq!(program.resize(1, 0), Err(SimplexError::NoConstraints));
        assert_eq!(program.number_of_variables(), 1);
    }

    #[test]
    fn edit_and_solve() {
        let mut program = LinearProgram::default();
        program.set_objective_coefficient(0, 3.0).unwrap();
        program.set_objective_coefficient(1, 5.0).unwrap();
        program.set_constraint_coefficient(0, 0, 1.0).unwrap();
        program.set_constraint_coefficient(0, 1, 2.0).unwrap();
        program.set_right_hand_side(0, 10.0).unwrap();

        assert!(program.set_objective_coefficient(2, 1.0).is_err());
        assert!(program.set_constraint_coefficient(1, 0, 1.0).is_err());
        assert!(program.set_right_hand_side(1, 1.0).is_err());

        let outcome = program
            .solve_with(&SolverOptions::default().strict(true))
            .unwrap();
        let solution = outcome.solution().unwrap();
        assert!((solution.objective() - 30.0).abs() < 1e-9);
        assert!((solution[Column::Decision(0)] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn info() {
        let program = LinearProgram::new(
            3,
            2,
            vec![3.0, -1.0, 0.0],
            vec![vec![1.0, 2.5, 0.0], vec![-2.0]],
            vec![10.0, 4.0],
        );
        let mut f = vec![];
        program.info(&mut f).unwrap();
        let text = String::from_utf8(f).unwrap();

        assert!(text.contains("Number of variables\t3"));
        assert!(text.contains("maximise Z = 3 x1 - x2"));
        assert!(text.contains("\tx1 + 2.5 x2 <= 10"));
        assert!(text.contains("\t-2 x1 <= 4"));
        assert!(text.contains("\tx1, x2, x3 >= 0"));
        assert!(text.contains("not valid"));
    }
}
