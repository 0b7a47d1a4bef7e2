//! Substitution of `fromParam` references.
//!
//! Each referencing field is resolved on its own: the result of one field
//! never feeds another, so the outcome does not depend on visiting order.
//! Literal fields are copied unchanged.

use schematic_model::{ComponentSpec, Parameterized};

use crate::error::{ResolveError, Result};
use crate::params::ParameterTable;

/// Produces a concrete copy of `spec` with every reference substituted.
///
/// A non-empty `fromParam` always wins over the field's literal value.
/// The template is never modified. Resolving a spec without references
/// returns an identical copy.
///
/// # Errors
///
/// - [`ResolveError::UnknownParameterReference`] if a reference names a
///   parameter missing from `table`.
/// - [`ResolveError::TypeMismatch`] if the parameter's type cannot be
///   stored in the referencing field.
pub fn resolve(spec: &ComponentSpec, table: &ParameterTable) -> Result<ComponentSpec> {
    tracing::info!(
        containers = spec.containers.len(),
        settings = spec.workload_settings.len(),
        parameters = table.len(),
        "resolving component spec"
    );
    let mut resolved = spec.clone();

    for (c, container) in resolved.containers.iter_mut().enumerate() {
        for (i, env) in container.env.iter_mut().enumerate() {
            substitute(env, &format!("containers[{c}].env[{i}]"), table)?;
        }
        for (i, file) in container.config.iter_mut().enumerate() {
            substitute(file, &format!("containers[{c}].config[{i}]"), table)?;
        }
    }
    for (i, setting) in resolved.workload_settings.iter_mut().enumerate() {
        substitute(setting, &format!("workloadSettings[{i}]"), table)?;
    }

    Ok(resolved)
}

fn substitute<F: Parameterized>(field: &mut F, path: &str, table: &ParameterTable) -> Result<()> {
    let Some(name) = field.reference().map(str::to_owned) else {
        return Ok(());
    };
    let entry = table
        .get(&name)
        .ok_or_else(|| ResolveError::UnknownParameterReference {
            field: path.to_owned(),
            parameter: name.clone(),
        })?;

    let expected = field.expected_type();
    let found = entry.declared_type();
    if !expected.accepts(found) {
        return Err(ResolveError::TypeMismatch {
            subject: path.to_owned(),
            expected,
            found: found.to_string(),
        });
    }

    tracing::debug!(field = path, parameter = %name, "substituting parameter");
    field.bind(entry.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use schematic_model::{
        ConfigFile, Container, Env, Parameter, ParameterType, WorkloadSetting,
    };

    use super::*;
    use crate::params::build;

    fn table(declared: &[Parameter], pairs: &[(&str, &str)]) -> ParameterTable {
        let supplied: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        build(declared, &supplied).expect("table should build")
    }

    fn spec_with_env(env: Vec<Env>) -> ComponentSpec {
        let mut container = Container::new("api", "api:1");
        container.env = env;
        ComponentSpec {
            containers: vec![container],
            ..ComponentSpec::default()
        }
    }

    fn setting(name: &str, ty: ParameterType, default: &str, from_param: &str) -> WorkloadSetting {
        WorkloadSetting {
            name: name.into(),
            parameter_type: ty,
            default: default.into(),
            from_param: from_param.into(),
            ..WorkloadSetting::default()
        }
    }

    #[test]
    fn reference_wins_over_literal() {
        let spec = spec_with_env(vec![Env {
            name: "X".into(),
            value: "literal".into(),
            from_param: "P".into(),
        }]);
        let params = table(
            &[Parameter::required("P", ParameterType::String)],
            &[("P", "override")],
        );

        let resolved = resolve(&spec, &params).expect("should resolve");
        assert_eq!(resolved.containers[0].env[0], Env::literal("X", "override"));
    }

    #[test]
    fn literal_without_reference_is_kept() {
        let spec = spec_with_env(vec![Env::literal("MODE", "prod")]);
        let resolved = resolve(&spec, &ParameterTable::empty()).expect("should resolve");
        assert_eq!(resolved, spec);
    }

    #[test]
    fn unknown_reference_fails() {
        let spec = spec_with_env(vec![Env::parameterized("X", "ghost")]);
        let err = resolve(&spec, &ParameterTable::empty()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownParameterReference {
                field: "containers[0].env[0]".into(),
                parameter: "ghost".into(),
            }
        );
    }

    #[test]
    fn env_renders_non_string_values() {
        let spec = spec_with_env(vec![
            Env::parameterized("DEBUG", "debug"),
            Env::parameterized("PORT", "port"),
            Env::parameterized("NOTHING", "nothing"),
        ]);
        let params = table(
            &[
                Parameter::required("debug", ParameterType::Boolean),
                Parameter::optional("port", ParameterType::Number, "42"),
                Parameter::optional("nothing", ParameterType::Null, ""),
            ],
            &[("debug", "false")],
        );

        let resolved = resolve(&spec, &params).expect("should resolve");
        let values: Vec<&str> = resolved.containers[0]
            .env
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(values, vec!["false", "42", ""]);
        assert!(resolved.is_concrete());
    }

    #[test]
    fn config_file_is_substituted() {
        let mut container = Container::new("api", "api:1");
        container.config = vec![ConfigFile {
            path: "/etc/api.toml".into(),
            value: "level = \"info\"".into(),
            from_param: "conf".into(),
        }];
        let spec = ComponentSpec {
            containers: vec![container],
            ..ComponentSpec::default()
        };
        let params = table(
            &[Parameter::required("conf", ParameterType::String)],
            &[("conf", "level = \"debug\"")],
        );

        let resolved = resolve(&spec, &params).expect("should resolve");
        let file = &resolved.containers[0].config[0];
        assert_eq!(file.value, "level = \"debug\"");
        assert!(file.from_param.is_empty());
    }

    #[test]
    fn workload_setting_takes_matching_type() {
        let spec = ComponentSpec {
            workload_settings: vec![setting("replicas", ParameterType::Number, "1", "count")],
            ..ComponentSpec::default()
        };
        let params = table(
            &[Parameter::optional("count", ParameterType::Number, "3")],
            &[],
        );

        let resolved = resolve(&spec, &params).expect("should resolve");
        assert_eq!(resolved.workload_settings[0].default, "3");
        assert!(resolved.workload_settings[0].from_param.is_empty());
    }

    #[test]
    fn workload_setting_rejects_incompatible_type() {
        let spec = ComponentSpec {
            workload_settings: vec![setting("replicas", ParameterType::Number, "", "name")],
            ..ComponentSpec::default()
        };
        let params = table(
            &[Parameter::required("name", ParameterType::String)],
            &[("name", "3")],
        );

        let err = resolve(&spec, &params).unwrap_err();
        assert_eq!(
            err,
            ResolveError::TypeMismatch {
                subject: "workloadSettings[0]".into(),
                expected: ParameterType::Number,
                found: "string".into(),
            }
        );
    }

    #[test]
    fn string_setting_accepts_any_type() {
        let spec = ComponentSpec {
            workload_settings: vec![setting("flag", ParameterType::String, "", "enabled")],
            ..ComponentSpec::default()
        };
        let params = table(
            &[Parameter::required("enabled", ParameterType::Boolean)],
            &[("enabled", "true")],
        );

        let resolved = resolve(&spec, &params).expect("should resolve");
        assert_eq!(resolved.workload_settings[0].default, "true");
    }

    #[test]
    fn template_is_not_mutated() {
        let spec = spec_with_env(vec![Env::parameterized("X", "P")]);
        let before = spec.clone();
        let params = table(
            &[Parameter::required("P", ParameterType::String)],
            &[("P", "v")],
        );

        let _resolved = resolve(&spec, &params).expect("should resolve");
        assert_eq!(spec, before);
    }

    #[test]
    fn error_names_the_failing_container_field() {
        let mut first = Container::new("a", "a:1");
        first.env = vec![Env::literal("OK", "1")];
        let mut second = Container::new("b", "b:1");
        second.config = vec![ConfigFile {
            path: "/x".into(),
            value: String::new(),
            from_param: "missing".into(),
        }];
        let spec = ComponentSpec {
            containers: vec![first, second],
            ..ComponentSpec::default()
        };

        let err = resolve(&spec, &ParameterTable::empty()).unwrap_err();
        assert!(
            err.to_string().contains("containers[1].config[0]"),
            "got: {err}"
        );
    }
}
