mod commands;
mod context;
mod output;

use std::process::ExitCode;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Parser, Subcommand};

use commands::convert::{self, ConvertArgs};
use commands::generate::{self, CheckArgs, GenerateArgs};
use output::{GlobalOptions, OutputManager};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Cyan.on_default().bold())
    .usage(AnsiColor::BrightBlue.on_default().bold())
    .literal(AnsiColor::Magenta.on_default())
    .placeholder(AnsiColor::BrightBlack.on_default())
    .error(AnsiColor::Red.on_default().bold());

const LOGGING_HELP: &str = "\
Logging:
  RUST_LOG=fieldgen_build=debug  Trace scanning and splicing decisions";

/// Generate field names, enums, visitors and mappers for Rust structs.
///
/// Scans schema sources for the fieldgen derives, writes each schema file
/// with its generated artifacts spliced in, and reports every declaration
/// that fails validation.
#[derive(Parser)]
#[command(name = "fieldgen", version, styles = STYLES, after_long_help = LOGGING_HELP)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate field artifacts from schema files
    #[command(after_long_help = generate::GENERATE_HELP)]
    Generate(GenerateArgs),

    /// Validate schema files and report stale output without writing
    #[command(after_long_help = generate::CHECK_HELP)]
    Check(CheckArgs),

    /// Show the identifiers generated for member names
    #[command(after_long_help = convert::CONVERT_HELP)]
    Convert(ConvertArgs),
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    if cli.options.no_color {
        colored::control::set_override(false);
    }
    let output = OutputManager::new(cli.options);

    let result = match cli.command {
        Command::Generate(args) => generate::handle_generate(args, &output),
        Command::Check(args) => generate::handle_check(args, &output),
        Command::Convert(args) => convert::handle_convert(args, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use output::OutputFormat;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fieldgen", "check", "--output", "json", "-q"]).unwrap();

        assert_eq!(cli.options.output_format, OutputFormat::Json);
        assert!(cli.options.quiet);
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn test_convert_requires_names() {
        assert!(Cli::try_parse_from(["fieldgen", "convert"]).is_err());
    }
}
