//! Formats command handler

use crate::cli::{FormatsArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use morphic_core::{formats, Registry};
use serde::Serialize;

/// One row of the format listing
#[derive(Debug, Serialize)]
struct FormatInfo {
    format: &'static str,
    extension: &'static str,
    parses_into: Option<String>,
}

#[derive(Debug, Serialize)]
struct Listing {
    formats: Vec<FormatInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    converters: Option<Vec<String>>,
}

/// Handle the formats command
pub fn handle_formats(args: FormatsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let converters = if args.converters {
        let registry = Registry::standard(&config.engine)?;
        Some(
            registry
                .converter_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        )
    } else {
        None
    };
    let listing = Listing {
        formats: known_formats(),
        converters,
    };

    if output.format() != OutputFormat::Human {
        return output.data(&listing);
    }

    output.section("Formats")?;
    let rows = listing
        .formats
        .iter()
        .map(|info| {
            vec![
                info.format.to_string(),
                info.extension.to_string(),
                info.parses_into.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output.table(&["Format", "Extension", "Parses into"], rows)?;

    if let Some(converters) = &listing.converters {
        output.section("Converters (dispatch order)")?;
        for (position, name) in converters.iter().enumerate() {
            output.writeln(&format!("{:>3}. {}", position + 1, name))?;
        }
    }
    Ok(())
}

fn known_formats() -> Vec<FormatInfo> {
    formats::KNOWN_FORMATS
        .iter()
        .chain(std::iter::once(&formats::PATH_EXPRESSION))
        .map(|&format| FormatInfo {
            format,
            extension: formats::to_ext(Some(format)),
            parses_into: formats::default_target(format).map(|tag| tag.to_string()),
        })
        .collect()
}
