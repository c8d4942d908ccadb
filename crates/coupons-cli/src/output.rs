// Rust guideline compliant 2026-10-18

//! Output formatting module for the Coupons CLI.
//!
//! This module provides functionality for formatting discount codes
//! in various output formats (JSON, table, plain text).

use crate::terminal::{paint, wrap_text};
use coupons_core::{DisplayStatus, Event, OutputFormat, View, ViewItem};
use serde_json::json;
use tabled::{builder::Builder, settings::Style};
use termcolor::Color;

/// What a mutating command did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A record was created.
    Created,
    /// A record was marked as used.
    MarkedUsed,
    /// A record was restored to active.
    Restored,
    /// A record was edited.
    Updated,
    /// A record was deleted.
    Deleted,
}

impl Action {
    /// Returns the machine-readable name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::MarkedUsed => "marked_used",
            Action::Restored => "restored",
            Action::Updated => "updated",
            Action::Deleted => "deleted",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Action::Created => "Created",
            Action::MarkedUsed => "Marked used",
            Action::Restored => "Restored",
            Action::Updated => "Updated",
            Action::Deleted => "Deleted",
        }
    }
}

/// Output formatter trait.
///
/// Defines the interface for formatting discount codes in different output formats.
pub trait OutputFormatter {
    /// Formats a single record with the events it currently accepts.
    fn format_code(&self, item: &ViewItem, events: &[Event]) -> String;

    /// Formats a filtered view with its counts and store list.
    fn format_view(&self, view: &View) -> String;

    /// Formats only the counts and store list of a view.
    fn format_stats(&self, view: &View) -> String;

    /// Formats the outcome of a mutating command.
    fn format_action(&self, action: Action, item: &ViewItem) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;
}

fn event_names(events: &[Event]) -> Vec<String> {
    events.iter().map(ToString::to_string).collect()
}

fn display_label(display: DisplayStatus) -> &'static str {
    match display {
        DisplayStatus::Active => "active",
        DisplayStatus::ExpiringSoon => "expiring soon",
        DisplayStatus::Expired => "expired",
        DisplayStatus::Used => "used",
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// JSON output formatter.
///
/// Formats records as valid JSON for machine consumption.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_code(&self, item: &ViewItem, events: &[Event]) -> String {
        let output = json!({
            "code": item,
            "valid_events": event_names(events),
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize code" }).to_string())
    }

    fn format_view(&self, view: &View) -> String {
        serde_json::to_string_pretty(view)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize view" }).to_string())
    }

    fn format_stats(&self, view: &View) -> String {
        let output = json!({
            "counts": view.counts,
            "available_stores": view.available_stores,
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize stats" }).to_string())
    }

    fn format_action(&self, action: Action, item: &ViewItem) -> String {
        let output = json!({
            "action": action.as_str(),
            "code": item,
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize result" }).to_string())
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

/// Table output formatter.
///
/// Formats records as human-readable tables, highlighting codes that
/// expire soon when color is enabled.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_cell(&self, display: DisplayStatus) -> String {
        let label = display_label(display);
        if !self.use_color {
            return label.to_string();
        }
        match display {
            DisplayStatus::ExpiringSoon => paint(label, Color::Yellow, true),
            DisplayStatus::Expired => paint(label, Color::Red, false),
            DisplayStatus::Used => paint(label, Color::Blue, false),
            DisplayStatus::Active => paint(label, Color::Green, false),
        }
    }

    fn summary(&self, view: &View) -> String {
        let mut output = format!(
            "Active: {}  Used: {}  Expired: {}  Total: {}",
            view.counts.active, view.counts.used, view.counts.expired, view.counts.total
        );
        if !view.available_stores.is_empty() {
            output.push_str(&format!("\nStores: {}", view.available_stores.join(", ")));
        }
        output
    }
}

impl OutputFormatter for TableFormatter {
    fn format_code(&self, item: &ViewItem, events: &[Event]) -> String {
        let code = &item.code;
        let mut output = String::new();

        output.push_str(&format!("ID:          {}\n", code.id));
        output.push_str(&format!("Store:       {}\n", code.store_name));
        output.push_str(&format!("Code:        {}\n", or_dash(code.code.as_deref())));
        output.push_str(&format!("Expires:     {}\n", code.expiry_date));
        output.push_str(&format!("Status:      {}\n", self.status_cell(item.display)));

        if let Some(min_amount) = code.min_amount {
            output.push_str(&format!("Min amount:  {}\n", min_amount));
        }
        if let Some(conditions) = &code.conditions {
            output.push_str(&format!("Conditions:  {}\n", wrap_text(conditions, 13)));
        }
        if let Some(image_url) = &code.image_url {
            output.push_str(&format!("Receipt:     {}\n", image_url));
        }
        if !events.is_empty() {
            output.push_str(&format!("Actions:     {}\n", event_names(events).join(", ")));
        }

        output
    }

    fn format_view(&self, view: &View) -> String {
        if view.items.is_empty() {
            return format!("No discount codes found.\n{}", self.summary(view));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Store", "Code", "Expires", "Status", "Min", "Receipt"]);

        for item in &view.items {
            let code = &item.code;
            builder.push_record([
                code.id.clone(),
                code.store_name.clone(),
                or_dash(code.code.as_deref()).to_string(),
                code.expiry_date.to_string(),
                self.status_cell(item.display),
                code.min_amount
                    .map(|amount| amount.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                if code.has_image() { "yes" } else { "-" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());

        format!("{}\n{}", table, self.summary(view))
    }

    fn format_stats(&self, view: &View) -> String {
        self.summary(view)
    }

    fn format_action(&self, action: Action, item: &ViewItem) -> String {
        format!(
            "✓ {} {} ({}, {})",
            action.label(),
            item.code.id,
            item.code.store_name,
            self.status_cell(item.display)
        )
    }

    fn format_error(&self, error: &str) -> String {
        if self.use_color {
            format!("{}{}", paint("Error: ", Color::Red, true), error)
        } else {
            format!("Error: {}", error)
        }
    }
}

/// Plain text output formatter.
///
/// Formats records as tab-separated lines without colors or tables.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_code(&self, item: &ViewItem, events: &[Event]) -> String {
        let code = &item.code;
        let mut output = String::new();

        output.push_str(&format!("{}\n", code.id));
        output.push_str(&format!("{}\n", code.store_name));
        output.push_str(&format!("{}\n", or_dash(code.code.as_deref())));
        output.push_str(&format!("{}\n", code.expiry_date));
        output.push_str(&format!("{}\n", item.display));
        if let Some(conditions) = &code.conditions {
            output.push_str(&format!("{}\n", conditions));
        }
        if !events.is_empty() {
            output.push_str(&format!("{}\n", event_names(events).join(" ")));
        }

        output
    }

    fn format_view(&self, view: &View) -> String {
        let mut output = String::new();
        for item in &view.items {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                item.code.id,
                item.display,
                item.code.expiry_date,
                item.code.store_name,
                or_dash(item.code.code.as_deref())
            ));
        }
        output.push_str(&self.format_stats(view));
        output
    }

    fn format_stats(&self, view: &View) -> String {
        format!(
            "active={} used={} expired={} total={}\nstores={}\n",
            view.counts.active,
            view.counts.used,
            view.counts.expired,
            view.counts.total,
            view.available_stores.join(",")
        )
    }

    fn format_action(&self, action: Action, item: &ViewItem) -> String {
        format!("{} {}", action.as_str(), item.code.id)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `use_color` - Whether to use colored output (ignored for JSON and plain)
///
/// # Returns
/// A boxed OutputFormatter instance
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
        OutputFormat::Plain => Box::new(PlainFormatter),
    }
}
