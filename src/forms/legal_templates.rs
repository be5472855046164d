use std::collections::BTreeMap;

use crate::domain::legal_template::TemplateValues;
use crate::forms::FormError;

/// Prefix of placeholder inputs in the generate form (`value[party_name]=...`).
const VALUE_PREFIX: &str = "value[";

/// Placeholder values posted by the template fill-in form.
#[derive(Debug, Default, PartialEq)]
pub struct GenerateForm {
    pub values: BTreeMap<String, String>,
}

impl GenerateForm {
    /// Parses a urlencoded body; keys other than `value[..]` are ignored.
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        let pairs: Vec<(String, String)> = serde_html_form::from_bytes(body)
            .map_err(|_| FormError::Malformed)?;
        let values = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                let name = key.strip_prefix(VALUE_PREFIX)?.strip_suffix(']')?.trim();
                let value = value.trim();
                (!name.is_empty() && !value.is_empty()).then(|| (name.to_string(), value.to_string()))
            })
            .collect();
        Ok(Self { values })
    }
}

impl From<GenerateForm> for TemplateValues {
    fn from(form: GenerateForm) -> Self {
        TemplateValues {
            values: form.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_placeholder_values() {
        let form =
            GenerateForm::parse(b"value%5Bparty_name%5D=Akram&value%5Bcourt%5D=&csrf=x").unwrap();
        assert_eq!(form.values.len(), 1);
        assert_eq!(form.values["party_name"], "Akram");
    }
}
