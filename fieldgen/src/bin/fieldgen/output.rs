use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::{Color, Colorize};
use comfy_table::{Attribute, Cell, Color as TableColor, Table, presets};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table
    #[default]
    Table,
    /// Pretty-printed JSON, for scripts and CI
    Json,
    /// One `key=value` line
    Compact,
}

/// Flags shared by every subcommand.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalOptions {
    /// Output format
    #[arg(long = "output", value_enum, default_value_t, global = true, env = "FIELDGEN_OUTPUT")]
    pub output_format: OutputFormat,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also print every file touched
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Structured results that can be rendered as a table or a single line.
pub trait TableDisplay {
    fn to_table(&self, options: &GlobalOptions) -> Table;
    fn to_compact(&self) -> String;
}

/// How a status line is marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Success,
    Failure,
    Warning,
    Note,
    Detail,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Tone::Success => "✓",
            Tone::Failure => "✗",
            Tone::Warning => "⚠",
            Tone::Note => "ℹ",
            Tone::Detail => "→",
        }
    }

    fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Failure => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Note => Color::Blue,
            Tone::Detail => Color::BrightBlack,
        }
    }
}

pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Status lines would corrupt JSON output.
    fn is_chatty(&self) -> bool {
        !self.options.quiet && self.options.output_format != OutputFormat::Json
    }

    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }

        let rendered = match self.options.output_format {
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Table => data.to_table(&self.options).to_string(),
            OutputFormat::Compact => data.to_compact(),
        };
        println!("{rendered}");
        Ok(())
    }

    pub fn success(&self, message: &str) {
        if self.is_chatty() {
            println!("{}", self.line(Tone::Success, message));
        }
    }

    /// Errors are printed even when quiet.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.line(Tone::Failure, message));
    }

    pub fn warning(&self, message: &str) {
        if self.is_chatty() {
            println!("{}", self.line(Tone::Warning, message));
        }
    }

    pub fn note(&self, message: &str) {
        if self.is_chatty() {
            println!("{}", self.line(Tone::Note, message));
        }
    }

    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", self.line(Tone::Detail, message));
        }
    }

    /// Indented list entry under the previous status line.
    pub fn item(&self, text: &str) {
        if self.is_chatty() {
            let bullet = if self.options.no_color {
                "•".normal()
            } else {
                "•".bright_black()
            };
            println!("  {bullet} {text}");
        }
    }

    fn line(&self, tone: Tone, message: &str) -> String {
        if self.options.no_color {
            format!("{} {message}", tone.marker())
        } else {
            format!("{} {}", tone.marker().color(tone.color()), message.color(tone.color()))
        }
    }
}

/// Table with bold headers; colors and box drawing only when color is on.
pub fn themed_table(options: &GlobalOptions, headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(if options.no_color {
        presets::ASCII_FULL
    } else {
        presets::UTF8_FULL_CONDENSED
    });
    table.set_header(headers.iter().map(|header| {
        let cell = Cell::new(header).add_attribute(Attribute::Bold);
        if options.no_color { cell } else { cell.fg(TableColor::Cyan) }
    }));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Count {
        label: String,
        total: usize,
    }

    impl TableDisplay for Count {
        fn to_table(&self, options: &GlobalOptions) -> Table {
            let mut table = themed_table(options, &["Label", "Total"]);
            table.add_row(vec![Cell::new(&self.label), Cell::new(self.total)]);
            table
        }

        fn to_compact(&self) -> String {
            format!("{}={}", self.label, self.total)
        }
    }

    fn plain(output_format: OutputFormat) -> OutputManager {
        OutputManager::new(GlobalOptions {
            output_format,
            no_color: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_json_output_suppresses_status_lines() {
        let output = plain(OutputFormat::Json);
        let count = Count {
            label: "artifacts".to_string(),
            total: 3,
        };

        assert!(output.display(&count).is_ok());
        assert!(!output.is_chatty());
    }

    #[test]
    fn test_quiet_output() {
        let output = OutputManager::new(GlobalOptions {
            quiet: true,
            ..Default::default()
        });

        assert!(!output.is_chatty());
        assert!(output.display(&Count { label: "files".to_string(), total: 0 }).is_ok());
    }

    #[test]
    fn test_table_headers() {
        let rendered = themed_table(&plain(OutputFormat::Table).options, &["Declaration", "Status"]).to_string();
        assert!(rendered.contains("Declaration"));
        assert!(rendered.contains("Status"));
    }

    #[test]
    fn test_plain_status_lines() {
        let output = plain(OutputFormat::Table);

        assert!(output.is_chatty());
        assert_eq!(output.line(Tone::Warning, "careful"), "⚠ careful");
        assert_eq!(output.line(Tone::Note, "3 schema path(s)"), "ℹ 3 schema path(s)");
    }
}
