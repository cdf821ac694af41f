//! Table output formatting using the `tabled` crate

use tabled::{builder::Builder, settings::style::Style};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format rows under the given headers as a rounded table.
    pub fn format_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());
        for row in rows {
            builder.push_record(row.iter().map(String::as_str));
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// Format a simple key-value table
    pub fn format_key_value(pairs: &[(&str, String)]) -> String {
        let mut builder = Builder::default();
        for (key, value) in pairs {
            builder.push_record([*key, value.as_str()]);
        }

        let mut table = builder.build();
        table.with(Style::blank());
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rows() {
        let rows = vec![
            vec!["Delhi".to_string(), "120".to_string()],
            vec!["Chicago".to_string(), "88".to_string()],
        ];
        let output = TableOutput::format_rows(&["Dataset", "Links"], &rows);
        assert!(output.contains("Dataset"));
        assert!(output.contains("Delhi"));
        assert!(output.contains("88"));
    }

    #[test]
    fn test_format_rows_empty() {
        assert_eq!(TableOutput::format_rows(&["Dataset"], &[]), "(no results)");
    }

    #[test]
    fn test_format_key_value() {
        let output = TableOutput::format_key_value(&[("Rows", "11".to_string())]);
        assert!(output.contains("Rows"));
        assert!(output.contains("11"));
    }
}
