use anyhow::Result;
use std::io::Write;

use crate::{
    optimisation_algorithms::simplex::SimplexOutcome, simplex_framework::exportable::Exportable,
};

impl Exportable for SimplexOutcome {
    fn export(&self, f: &mut dyn Write) -> Result<()> {
        for record in self.iterations() {
            record.write_text(f)?;
            writeln!(f)?;
        }
        if let Some(solution) = self.solution() {
            solution.write_text(f)?;
        }
        Ok(())
    }

    fn export_json(&self, f: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *f, self)?;
        Ok(writeln!(f)?)
    }
}
