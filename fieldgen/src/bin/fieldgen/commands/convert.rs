use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use fieldgen_codegen::{is_valid_artifact_name, to_lower_snake, to_screaming_snake};
use serde::Serialize;

use crate::output::{GlobalOptions, OutputManager, TableDisplay, themed_table};

pub const CONVERT_HELP: &str = "\
Examples:
  fieldgen convert orderDate            ORDER_DATE and order_date
  fieldgen convert HTTPServer id2Key    Several names at once
  fieldgen convert sku --output json";

#[derive(Args)]
pub struct ConvertArgs {
    /// Member names to convert
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

/// Generated identifiers for one member name.
#[derive(Debug, Serialize, PartialEq)]
struct Conversion {
    name: String,
    variant: String,
    operation_suffix: String,
    valid_identifier: bool,
}

#[derive(Serialize)]
#[serde(transparent)]
struct Conversions(Vec<Conversion>);

impl TableDisplay for Conversions {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Member", "Enum variant", "Operation suffix"]);
        for conversion in &self.0 {
            table.add_row(vec![
                Cell::new(&conversion.name),
                Cell::new(&conversion.variant),
                Cell::new(&conversion.operation_suffix),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|conversion| format!("{}={}", conversion.name, conversion.variant))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn convert(name: &str) -> Conversion {
    let variant = to_screaming_snake(name);
    Conversion {
        name: name.to_string(),
        valid_identifier: is_valid_artifact_name(&variant),
        operation_suffix: to_lower_snake(name),
        variant,
    }
}

pub fn handle_convert(args: ConvertArgs, output: &OutputManager) -> Result<()> {
    let conversions = Conversions(args.names.iter().map(|name| convert(name)).collect());

    output.display(&conversions)?;

    for conversion in conversions.0.iter().filter(|conversion| !conversion.valid_identifier) {
        output.warning(&format!(
            "`{}` converts to `{}`, which is not a valid Rust identifier",
            conversion.name, conversion.variant
        ));
    }

    Ok(())
}
