use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a `--set` argument: a JSON object.
pub fn parse_object(raw: &str, field: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => anyhow::bail!("invalid {field}: expected a JSON object"),
        Err(error) => anyhow::bail!("invalid {field}: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use olcme_core::enums::TemplateKind;

    use super::*;

    #[test]
    fn parses_template_names() {
        let kind: TemplateKind = parse_enum("MaxDiff", "template").expect("should parse");
        assert_eq!(kind, TemplateKind::MaxDiff);
        let kind: TemplateKind = parse_enum("forced", "template").expect("should parse");
        assert_eq!(kind, TemplateKind::Forced);
    }

    #[test]
    fn errors_on_unknown_template() {
        let err = parse_enum::<TemplateKind>("likert", "template").expect_err("should fail");
        assert!(err.to_string().contains("invalid template 'likert'"));
    }

    #[test]
    fn set_must_be_an_object() {
        assert!(parse_object(r#"{"prompt":"x"}"#, "--set").is_ok());
        assert!(parse_object("[1]", "--set").is_err());
        assert!(parse_object("{", "--set").is_err());
    }
}
