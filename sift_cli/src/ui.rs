//! Terminal output helpers.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use clap::ValueEnum;
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;
use sift_core::component::FilterComponent;
use sift_core::{Configuration, LogicalFilterComponent, Record};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

static PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

/// Shared progress area, so log lines don't tear through spinners.
pub fn progress() -> &'static MultiProgress {
    PROGRESS.get_or_init(MultiProgress::new)
}

pub fn header(message: &str) {
    eprintln!("{}", style(message).bold().cyan());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", style("•").blue(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

pub fn error_with_details(message: &str, details: &str) {
    error(message);
    eprintln!("  {}", style(details).dim());
}

pub fn debug(message: &str) {
    log::debug!("{}", message);
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = progress().add(ProgressBar::new_spinner());
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn raw_output(output: &str) {
    println!("{}", output);
}

pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Couldn't serialize output", &e.to_string()),
    }
}

/// One line per configuration, marking the current and default ones.
pub fn pretty_output_configuration_list(rows: &[ConfigurationRow]) {
    for row in rows {
        let marker = if row.current { style("▸").green().bold().to_string() } else { " ".to_string() };
        let name = row.name.as_deref().unwrap_or("(unnamed)");
        let default = if row.default { style(" [default]").magenta().to_string() } else { String::new() };
        println!(
            "{} {} {}{} {}",
            marker,
            style(&row.id).bold(),
            name,
            default,
            style(format!("({})", row.kind)).dim()
        );
    }
}

/// A configuration as listed by `sift list`.
#[derive(Debug, Serialize)]
pub struct ConfigurationRow {
    pub id: String,
    pub name: Option<String>,
    pub kind: &'static str,
    pub current: bool,
    pub default: bool,
}

pub fn pretty_output_configuration(configuration: &Configuration) {
    println!(
        "{} {}",
        style(configuration.display_name()).bold(),
        style(format!("({})", configuration.id())).dim()
    );
    print_group(configuration.root_logical_filter_component(), configuration, 1);

    if !configuration.default_values().is_empty() {
        println!("{}", style("Defaults").bold());
        for (parameter_name, value) in configuration.default_values() {
            println!("  {} = {}", parameter_name, value);
        }
    }
}

fn print_group(group: &LogicalFilterComponent, configuration: &Configuration, depth: usize) {
    let indent = "  ".repeat(depth);
    if group.is_empty() {
        println!("{}{}", indent, style("(no conditions)").dim());
        return;
    }

    println!("{}{}", indent, style(group.operation()).yellow());
    for child in group.children() {
        let modified = if configuration.is_component_modified(child.id()) {
            style(" *").red().to_string()
        } else {
            String::new()
        };
        match child {
            FilterComponent::Logical(inner) => print_group(inner, configuration, depth + 1),
            FilterComponent::Property(filter) => {
                let value = match filter.value() {
                    Some(value) => value.to_string(),
                    None if filter.operation().is_unary() => String::new(),
                    None => style("(empty)").dim().to_string(),
                };
                println!(
                    "{}  {}: {} {} {}{}",
                    indent,
                    style(filter.caption()).bold(),
                    filter.operation().symbol(),
                    value,
                    style(format!("[{}]", filter.parameter_name())).dim(),
                    modified
                );
            }
            FilterComponent::Custom(custom) => {
                println!(
                    "{}  {}: {}{}",
                    indent,
                    style(custom.caption()).bold(),
                    custom.condition(),
                    modified
                );
            }
        }
    }
}

pub fn pretty_output_records(records: &[Record]) {
    for record in records {
        let fields: Vec<String> = record
            .property_paths()
            .iter()
            .filter_map(|path| record.get(path).map(|value| format!("{}={}", path, value)))
            .collect();
        println!("{} {}", style(&record.id).bold(), fields.join(" "));
    }
}
