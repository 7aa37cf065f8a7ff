//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod pretty;
pub mod table;

/// Render `data` in the requested format.
///
/// `rows` feeds the table format and `pretty` renders the human view; JSON
/// serializes `data` inside the standard envelope.
pub fn render<T, R, F>(format: OutputFormat, data: &T, rows: &[R], pretty: F) -> Result<String>
where
    T: Serialize + ?Sized,
    R: Tabled,
    F: FnOnce() -> String,
{
    Ok(match format {
        OutputFormat::Json => json::format_json(data)?,
        OutputFormat::Table => table::format_table(rows),
        OutputFormat::Pretty => pretty(),
    })
}

/// Render and print to stdout.
pub fn print<T, R, F>(format: OutputFormat, data: &T, rows: &[R], pretty: F) -> Result<()>
where
    T: Serialize + ?Sized,
    R: Tabled,
    F: FnOnce() -> String,
{
    println!("{}", render(format, data, rows, pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let rows = vec![Row {
            id: "t-1".to_string(),
        }];

        let json = render(OutputFormat::Json, &rows, &rows, || unreachable!()).unwrap();
        assert!(json.contains("\"data\""));

        let table = render(OutputFormat::Table, &rows, &rows, || unreachable!()).unwrap();
        assert!(table.contains("ID"));

        let pretty = render(OutputFormat::Pretty, &rows, &rows, || "pretty".to_string()).unwrap();
        assert_eq!(pretty, "pretty");
    }
}
