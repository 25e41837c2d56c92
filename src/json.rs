use anyhow::{Context, Result, anyhow};
use serde_json::Value;

pub fn read_field_number(json: &Value, field: &str) -> Result<usize> {
    match &json[field] {
        Value::Null => return Err(anyhow!("field `{}` not found", field)),
        Value::Bool(_) => return Err(anyhow!("field is a boolean, where number expected")),
        Value::Number(n) => match n.as_u64() {
            Some(n) => Ok(usize::try_from(n)?),
            None => Err(anyhow!("number is not a non-negative integer")),
        },
        Value::String(_) => return Err(anyhow!("field is a literal, where number expected")),
        Value::Array(_) => return Err(anyhow!("field is a list, where number expected")),
        Value::Object(_) => return Err(anyhow!("field is an object, where number expected")),
    }
}

/// Reads an optional field: absent or `null` gives `None`.
pub fn read_field_number_optional(json: &Value, field: &str) -> Result<Option<usize>> {
    match &json[field] {
        Value::Null => Ok(None),
        _ => Ok(Some(read_field_number(json, field)?)),
    }
}

pub fn read_field_list<'a>(json: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    match &json[field] {
        Value::Null => return Err(anyhow!("field `{}` not found", field)),
        Value::Bool(_) => return Err(anyhow!("field is a boolean, where list expected")),
        Value::Number(_) => return Err(anyhow!("field is a number, where list expected")),
        Value::String(_) => return Err(anyhow!("field is a literal, where list expected")),
        Value::Array(arr) => return Ok(&arr),
        Value::Object(_) => return Err(anyhow!("field is an object, where list expected")),
    }
}

/// A real number; numeric strings such as `"2.5"` are accepted too.
pub fn read_value_real(value: &Value) -> Result<f64> {
    match value {
        Value::Null => Err(anyhow!("value is missing, where number expected")),
        Value::Bool(_) => Err(anyhow!("value is a boolean, where number expected")),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| anyhow!("number {} cannot be represented", n)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .with_context(|| format!("literal `{}` is not a number", s)),
        Value::Array(_) => Err(anyhow!("value is a list, where number expected")),
        Value::Object(_) => Err(anyhow!("value is an object, where number expected")),
    }
}

pub fn read_list_reals(list: &[Value]) -> Result<Vec<f64>> {
    list.iter()
        .enumerate()
        .map(|(i, value)| read_value_real(value).with_context(|| format!("entry {}", i + 1)))
        .collect()
}

pub fn read_field_reals(json: &Value, field: &str) -> Result<Vec<f64>> {
    let list = read_field_list(json, field)?;
    read_list_reals(list).with_context(|| format!("reading field `{}`", field))
}

/// A list of lists of real numbers; the inner lists may differ in length.
pub fn read_field_matrix(json: &Value, field: &str) -> Result<Vec<Vec<f64>>> {
    let rows = read_field_list(json, field)?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Array(row) => read_list_reals(row),
            _ => Err(anyhow!("row is not a list")),
        }
        .with_context(|| format!("reading row {} of field `{}`", i + 1, field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{read_field_matrix, read_field_number, read_field_number_optional, read_field_reals};

    #[test]
    fn reals_and_matrices() {
        let value = json!({
            "objective": [3, "5", 1.5],
            "constraints": [[1, 2], [], [0.5]],
            "bad": [[1], 2],
            "n": 2
        });

        assert_eq!(read_field_reals(&value, "objective").unwrap(), vec![3.0, 5.0, 1.5]);
        assert_eq!(
            read_field_matrix(&value, "constraints").unwrap(),
            vec![vec![1.0, 2.0], vec![], vec![0.5]]
        );
        assert!(read_field_matrix(&value, "bad").is_err());
        assert!(read_field_reals(&value, "missing").is_err());

        assert_eq!(read_field_number(&value, "n").unwrap(), 2);
        assert_eq!(read_field_number_optional(&value, "missing").unwrap(), None);
        assert!(read_field_number(&value, "objective").is_err());
    }
}
