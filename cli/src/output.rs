//! Output formatting for CLI

use anyhow::Result;
use console::{style, Style};
use snapsched::report::{self, ScheduleRow, NO_RESOURCES_FOUND};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse a format name from the config file, falling back to table
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            _ => Self::Table,
        }
    }
}

/// Render schedule rows in the requested format
///
/// No rows renders as the "no resources" message in every format.
pub fn render_rows(rows: &[ScheduleRow], format: OutputFormat) -> Result<String> {
    if rows.is_empty() {
        return Ok(NO_RESOURCES_FOUND.to_string());
    }
    let rendered = match format {
        OutputFormat::Table => report::render_table(rows),
        OutputFormat::Json => report::render_json(rows)?,
        OutputFormat::Yaml => report::render_yaml(rows)?,
    };
    Ok(rendered)
}

/// Print schedule rows in the requested format
pub fn print_rows(rows: &[ScheduleRow], format: OutputFormat) -> Result<()> {
    println!("{}", render_rows(rows, format)?.trim_end());
    Ok(())
}

/// Success message
pub fn success(msg: impl Display) {
    println!("{}", msg);
}

/// Warning message
pub fn warning(msg: impl Display) {
    eprintln!("{} {}", style("warning:").yellow().bold(), msg);
}

/// Error message
pub fn error(msg: impl Display) {
    eprintln!("{} {}", style("error:").red().bold(), msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: impl Display) {
    let key_style = Style::new().cyan().bold();
    println!("{}: {}", key_style.apply_to(key), value);
}

/// Print a section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(title).bold().underlined());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ScheduleRow {
        ScheduleRow {
            name: "s1".to_string(),
            policy_name: "p1".to_string(),
            cluster_pair: "cp1".to_string(),
            last_success_time: None,
            last_success_policy: None,
        }
    }

    #[test]
    fn test_empty_rows_in_every_format() {
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Yaml] {
            assert_eq!(render_rows(&[], format).unwrap(), NO_RESOURCES_FOUND);
        }
    }

    #[test]
    fn test_table_starts_with_header() {
        let table = render_rows(&[row()], OutputFormat::Table).unwrap();
        assert!(table.trim_start().starts_with("NAME"));
    }

    #[test]
    fn test_json_output() {
        let json = render_rows(&[row()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "s1");
    }

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config("YAML"), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_config("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("wide"), OutputFormat::Table);
    }
}
