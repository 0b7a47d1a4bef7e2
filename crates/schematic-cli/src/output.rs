//! Formatted output helpers for CLI commands.

use std::fmt::Write;

use schematic_engine::ValidationError;
use schematic_model::Parameter;

/// Formats violations one per line, prefixed with their position.
#[must_use]
pub fn format_violations(violations: &[ValidationError]) -> String {
    let mut out = String::new();
    for (i, violation) in violations.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {violation}", i + 1);
    }
    out
}

/// Formats declared parameters as an aligned table.
#[must_use]
pub fn format_parameters(parameters: &[Parameter]) -> String {
    let width = parameters
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:<8}  {:<8}  DEFAULT", "NAME", "TYPE", "REQUIRED");
    for param in parameters {
        let default = if param.required {
            "-".to_owned()
        } else {
            format!("{:?}", param.default)
        };
        let _ = writeln!(
            out,
            "{:<width$}  {:<8}  {:<8}  {default}",
            param.name,
            param.parameter_type.to_string(),
            if param.required { "yes" } else { "no" },
        );
        if !param.description.is_empty() {
            let _ = writeln!(out, "{:<width$}  {}", "", param.description);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use schematic_engine::Rule;
    use schematic_model::ParameterType;

    use super::*;

    #[test]
    fn violations_are_numbered() {
        let violations = vec![
            ValidationError {
                path: "containers".into(),
                rule: Rule::NoContainers,
                message: "at least one container is required".into(),
            },
            ValidationError {
                path: "parameters[1].name".into(),
                rule: Rule::DuplicateParameterName,
                message: "duplicate parameter name: \"a\"".into(),
            },
        ];
        let out = format_violations(&violations);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "   1. containers: at least one container is required [NoContainers]"
        );
        assert!(lines[1].starts_with("   2. parameters[1].name"));
    }

    #[test]
    fn parameter_table_aligns_columns() {
        let mut described = Parameter::required("image", ParameterType::String);
        described.description = "Container image".into();
        let out = format_parameters(&[
            described,
            Parameter::optional("listenPort", ParameterType::Number, "80"),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "NAME        TYPE      REQUIRED  DEFAULT");
        assert_eq!(lines[1], "image       string    yes       -");
        assert_eq!(lines[2], "            Container image");
        assert_eq!(lines[3], "listenPort  number    no        \"80\"");
    }

    #[test]
    fn empty_parameter_list_prints_header_only() {
        assert_eq!(format_parameters(&[]).lines().count(), 1);
    }
}
