//! Table/JSON/YAML rendering of analysis results for the CLI.

use anyhow::Result;
use prettytable::{format, Cell, Row, Table};

use codescope_core::{ModuleReport, ProjectResult};

use crate::cli::OutputFormat;

fn table_format() -> format::TableFormat {
    format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '┌', '┐'),
        )
        .separators(
            &[format::LinePosition::Intern],
            format::LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '└', '┘'),
        )
        .padding(1, 1)
        .build()
}

fn module_row(report: &ModuleReport) -> Row {
    Row::new(vec![
        Cell::new(&report.path),
        Cell::new(&format!("{:.1}", report.cyclomatic)),
        Cell::new(&format!("{:.1}", report.effort)),
        Cell::new(&format!("{:.1}", report.maintainability)),
    ])
}

/// Renders a single module's report in `format`.
pub fn render_module_report(report: &ModuleReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_format(table_format());
            table.add_row(Row::new(vec![
                Cell::new("Module"),
                Cell::new("Cyclomatic"),
                Cell::new("Effort"),
                Cell::new("Maintainability"),
            ]));
            table.add_row(module_row(report));
            Ok(table.to_string())
        }
    }
}

/// Renders a project-wide result in `format`: one row per module plus a
/// summary of the dependency-graph scalars.
pub fn render_project_result(result: &ProjectResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(result)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_format(table_format());
            table.add_row(Row::new(vec![
                Cell::new("Module"),
                Cell::new("Cyclomatic"),
                Cell::new("Effort"),
                Cell::new("Maintainability"),
            ]));
            for report in &result.reports {
                table.add_row(module_row(report));
            }

            let mut rendered = table.to_string();
            if result.processed {
                rendered.push_str(&format!(
                    "\nfirst-order density: {:.1}%   change cost: {:.1}%   core size: {:.1}%\n",
                    result.first_order_density, result.change_cost, result.core_size
                ));
                rendered.push_str(&format!(
                    "averages - cyclomatic: {:.1}  effort: {:.1}  maintainability: {:.1}\n",
                    result.avg_cyclomatic, result.avg_effort, result.avg_maintainability
                ));
            } else {
                rendered.push_str("\n(skip_calculation set: dependency graph not computed)\n");
            }
            Ok(rendered)
        }
    }
}
