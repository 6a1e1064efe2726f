//! Schema export module
//!
//! Renders the schema translation as shareable reports. The original editor
//! only displayed the schema in a dialog; here the text form can also be
//! written to a file, plainly or as Markdown.

use std::error::Error;
use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::core::schema::SchemaReport;
use crate::core::store::DiagramStore;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("templates/schema.md");

/// Data context for schema report rendering
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Name of the diagram slot being reported
    pub slot: &'a str,
    /// The diagram the schema was projected from
    pub store: &'a DiagramStore,
    /// The projected schema
    pub report: &'a SchemaReport,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(slot: &'a str, store: &'a DiagramStore, report: &'a SchemaReport) -> Self {
        Self {
            slot,
            store,
            report,
        }
    }

    /// Number of entities in the diagram
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.report.tables.len()
    }

    /// Number of edges in the diagram
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.store.edges().len()
    }
}

/// Supported schema export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text, one `Table(columns)` line per entity
    Text,
    /// Markdown with a table overview
    Markdown,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" | "plain" => Ok(Self::Text),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Trait for schema report generators
pub trait SchemaReporter {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

/// Plain-text schema reporter
pub struct TextReporter;

impl SchemaReporter for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(ctx.report.to_string())
    }
}

/// Markdown schema reporter driven by the embedded template
pub struct MarkdownReporter;

impl MarkdownReporter {
    fn table_rows(ctx: &ReportContext) -> String {
        let mut rows = String::new();
        for table in &ctx.report.tables {
            let _ = writeln!(rows, "| {} | {} |", table.name, table.columns.join(", "));
        }
        rows
    }
}

impl SchemaReporter for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut output = MARKDOWN_TEMPLATE.to_string();
        output = output.replace("{{slot}}", ctx.slot);
        output = output.replace("{{entity_count}}", &ctx.entity_count().to_string());
        output = output.replace("{{edge_count}}", &ctx.edge_count().to_string());
        output = output.replace("{{schema}}", ctx.report.to_string().trim_end());
        output = output.replace("{{table_rows}}", Self::table_rows(ctx).trim_end());
        Ok(output)
    }
}

/// Reporter instance for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn SchemaReporter> {
    match format {
        ReportFormat::Text => Box::new(TextReporter),
        ReportFormat::Markdown => Box::new(MarkdownReporter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::translate;

    fn sample() -> DiagramStore {
        let mut store = DiagramStore::new();
        let ent = store.add_entity("Student", false);
        store.add_attribute(&ent, "id").expect("attribute");
        store
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("md".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("TEXT".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_text_reporter_matches_display() {
        let store = sample();
        let report = translate(&store);
        let ctx = ReportContext::new("diagram", &store, &report);
        let rendered = TextReporter.render(&ctx).expect("render");
        assert_eq!(rendered, "Student(id)\n");
    }

    #[test]
    fn test_markdown_reporter_fills_placeholders() {
        let store = sample();
        let report = translate(&store);
        let ctx = ReportContext::new("classroom", &store, &report);
        let rendered = MarkdownReporter.render(&ctx).expect("render");

        assert!(rendered.contains("# Relational Schema: classroom"));
        assert!(rendered.contains("Student(id)"));
        assert!(rendered.contains("| Student | id |"));
        assert!(!rendered.contains("{{"), "all placeholders substituted");
    }
}
