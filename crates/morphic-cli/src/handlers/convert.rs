//! Convert command handler

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use morphic_core::{
    formats, kinds, Conversion, Convertible, Error as CoreError, FormattedText, Registry, Source,
    TypeTag, Value,
};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const STDIN: &str = "-";

/// Handle the convert command
pub fn handle_convert(args: ConvertArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let registry = Registry::standard(&config.engine)?;
    let target = TypeTag::parse(&args.to)?;

    let input = read_input(&args.input)?;
    let source = source_tag(&args.input, args.from.as_deref())?;
    let value = input_value(input, &source, &args.input)?;
    let conversion = Conversion::new(source, target);
    tracing::info!(input = %args.input, conversion = %conversion, "Converting");

    let result = {
        let _timer = Timer::new("conversion");
        convert_value(&registry, &value, &conversion)?
    };
    let mut rendered = render(&result, &registry)?;
    if config.output.trailing_newline && !rendered.is_empty() && !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match args.output_file {
        Some(path) => {
            fs::write(&path, &rendered)?;
            output.success(&format!("✓ Wrote {} to {}", conversion.target(), path.display()))
        }
        None => output.write(&rendered),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == STDIN {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }

    let path = Path::new(input);
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// The declared source type, or `Text<format>` inferred from the file extension
fn source_tag(input: &str, from: Option<&str>) -> Result<TypeTag> {
    if let Some(from) = from {
        return Ok(TypeTag::parse(from)?);
    }
    if input == STDIN {
        return Err(Error::invalid_args(
            "--from is required when reading from stdin",
        ));
    }

    let path = PathBuf::from(input);
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::UnknownFormat {
            path: path.clone(),
            reason: "the file has no extension, pass --from".to_string(),
        })?;
    let format = formats::from_ext(ext).ok_or_else(|| Error::UnknownFormat {
        path: path.clone(),
        reason: format!("unrecognised extension '.{}', pass --from", ext),
    })?;
    Ok(TypeTag::text(Some(format)))
}

/// Text read from disk enters the engine as a string or as a text container
fn input_value(content: String, source: &TypeTag, label: &str) -> Result<Value> {
    if source.is_kind(kinds::STRING) {
        Ok(Value::String(content))
    } else if source.is_kind(kinds::TEXT) {
        let origin = Source::external(label);
        Ok(FormattedText::wrap(content, source.format(), Some(origin)).into())
    } else {
        Err(Error::invalid_args(format!(
            "input can only be read as string or Text, not {}",
            source
        )))
    }
}

/// Run `conversion`, going through `Data` when no converter handles it in
/// one step and the source parses into data
fn convert_value(registry: &Registry, value: &Value, conversion: &Conversion) -> Result<Value> {
    let unsupported = match registry.convert(value, conversion) {
        Ok(output) => return Ok(output),
        Err(err @ CoreError::NoConverterFound { .. }) => err,
        Err(err) => return Err(err.into()),
    };
    if conversion.target().is_kind(kinds::DATA) {
        return Err(unsupported.into());
    }

    let to_data = Conversion::new(conversion.source().clone(), TypeTag::data());
    let data = match registry.convert(value, &to_data) {
        Ok(data) => data,
        Err(CoreError::NoConverterFound { .. }) => return Err(unsupported.into()),
        Err(err) => return Err(err.into()),
    };
    tracing::debug!(conversion = %conversion, "No direct converter, went through Data");
    let from_data = Conversion::new(TypeTag::data(), conversion.target().clone());
    Ok(registry.convert(&data, &from_data)?)
}

/// Data is written as JSON, everything else as its plain-text rendering
fn render(result: &Value, registry: &Registry) -> Result<String> {
    let payload = match result {
        Value::Object(object) => object.value(),
        other => other,
    };
    if matches!(payload, Value::Data(_)) {
        Ok(payload.to_json(registry)?)
    } else {
        Ok(result.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_source_tag_from_extension() {
        assert_eq!(
            source_tag("people.csv", None).unwrap(),
            TypeTag::text(Some(formats::CSV))
        );
        assert_eq!(
            source_tag("notes.md", None).unwrap(),
            TypeTag::text(Some(formats::MARKDOWN))
        );
        assert_eq!(
            source_tag("-", Some("string<text/x-yaml>")).unwrap(),
            TypeTag::string(Some(formats::YAML))
        );
    }

    #[test]
    fn test_source_tag_errors() {
        assert!(matches!(source_tag("-", None), Err(Error::InvalidArgs(_))));
        assert!(matches!(
            source_tag("archive.bin", None),
            Err(Error::UnknownFormat { .. })
        ));
        assert!(matches!(
            source_tag("Makefile", None),
            Err(Error::UnknownFormat { .. })
        ));
        assert!(matches!(
            source_tag("a.csv", Some("")),
            Err(Error::Core(_))
        ));
    }

    #[test]
    fn test_input_value() {
        let value = input_value("a: 1".to_string(), &TypeTag::text(Some(formats::YAML)), "in.yaml")
            .unwrap();
        assert_eq!(value.type_tag(), TypeTag::text(Some(formats::YAML)));
        assert_eq!(value.source(), Some(&Source::external("in.yaml")));

        let value = input_value("x".to_string(), &TypeTag::string(None), "-").unwrap();
        assert_eq!(value, Value::from("x"));

        assert!(input_value("x".to_string(), &TypeTag::data(), "-").is_err());
    }

    #[test]
    fn test_convert_goes_through_data() {
        let registry = Registry::default();
        let csv = Value::from(FormattedText::wrap("a,b\n1,2\n", Some(formats::CSV), None));
        let conversion: Conversion = "Text<text/csv>:string<application/json>".parse().unwrap();
        assert!(matches!(
            registry.convert(&csv, &conversion),
            Err(CoreError::NoConverterFound { .. })
        ));

        let json = convert_value(&registry, &csv, &conversion).unwrap();
        assert_eq!(json, Value::from("[\n  {\n    \"a\": \"1\",\n    \"b\": \"2\"\n  }\n]"));
    }

    #[test]
    fn test_convert_without_any_route() {
        let registry = Registry::default();
        let conversion: Conversion = "string:Ast".parse().unwrap();
        let err = convert_value(&registry, &Value::from("$.a"), &conversion).unwrap_err();
        match err {
            Error::Core(CoreError::NoConverterFound { conversion }) => {
                assert_eq!(conversion.to_string(), "string:Ast")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_render() {
        let registry = Registry::default();
        let data = Value::from(json!({"a": [1, 2]}));
        assert_eq!(
            render(&data, &registry).unwrap(),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );

        let text = Value::from(FormattedText::wrap("<p>hi</p>", Some(formats::HTML), None));
        assert_eq!(render(&text, &registry).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_convert_file_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("rows.csv");
        let saved = dir.path().join("rows.yaml");
        fs::write(&input, "name,qty\npen,3\n").unwrap();

        let args = ConvertArgs {
            input: input.display().to_string(),
            to: "string<text/x-yaml>".to_string(),
            from: None,
            output_file: Some(saved.clone()),
        };
        let mut output = OutputWriter::with_writer(
            crate::cli::OutputFormat::Human,
            false,
            true,
            Box::new(std::io::sink()),
        );
        handle_convert(args, &Config::default(), &mut output).unwrap();

        assert_eq!(fs::read_to_string(saved).unwrap(), "- name: pen\n  qty: '3'\n");
    }
}
