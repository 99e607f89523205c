use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_value_table(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Like [`output`], but `table` uses the given column order instead of keys.
pub fn output_rows<T: Serialize>(
    value: &T,
    headers: &[&str],
    rows: &[Vec<String>],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Table {
        println!("{}", render_rows(headers, rows));
        return Ok(());
    }
    output(value, format)
}

fn render_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::from("(no rows)");
    }
    table::render_table(headers, rows, table_options())
}

fn render_value_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_array_table(items),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            render_rows(&["key", "value"], &rows)
        }
        scalar => render_rows(&["value"], &[vec![value_to_cell(scalar)]]),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return render_rows(&["value"], &rows);
    }

    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key.as_str());
            }
        }
    }
    // ids first when present
    if let Some(position) = headers.iter().position(|h| *h == "id") {
        let id = headers.remove(position);
        headers.insert(0, id);
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| "-".to_string(), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    render_rows(&headers, &rows)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: i64,
        title: &'static str,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: 7, title: "x" };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], 7);
        assert_eq!(parsed["title"], "x");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: 7, title: "x" };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn array_table_puts_id_first() {
        let value = json!([
            { "title": "Pilot", "id": 2 },
            { "title": "Deneme", "id": 1 },
        ]);
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap();
        assert!(header.starts_with("id"), "{header}");
        assert!(out.contains("Pilot"));
    }

    #[test]
    fn empty_array_has_placeholder() {
        let out = render(&json!([]), OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn nested_values_render_as_compact_json() {
        let value = json!({ "spec": { "version": "0.1" } });
        let out = render(&value, OutputFormat::Table).unwrap();
        assert!(out.contains(r#"{"version":"0.1"}"#));
    }
}
