use anyhow::Result;

pub trait Exportable {
    /// Writes the object in its human-readable text form.
    fn export(&self, f: &mut dyn std::io::Write) -> Result<()>;

    fn export_json(&self, f: &mut dyn std::io::Write) -> Result<()>;
}

impl Exportable for String {
    fn export(&self, f: &mut dyn std::io::Write) -> Result<()> {
        Ok(writeln!(f, "{}", self)?)
    }

    fn export_json(&self, f: &mut dyn std::io::Write) -> Result<()> {
        serde_json::to_writer(&mut *f, self)?;
        Ok(writeln!(f)?)
    }
}

#[cfg(test)]
mod tests {
    use super::Exportable;

    #[test]
    fn string() {
        let mut f = vec![];
        "a \"b\"".to_string().export_json(&mut f).unwrap();
        assert_eq!(String::from_utf8(f).unwrap(), "\"a \\\"b\\\"\"\n");
    }
}
