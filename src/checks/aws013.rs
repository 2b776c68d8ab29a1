//! AWS013: Task definition container environment holds a secret
//!
//! `container_definitions` is a JSON document. Environment variables with
//! credential-like names and literal values end up in plain text in the task
//! definition.

use crate::checks::helpers::is_sensitive_name;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ContainerDefinition {
    #[serde(default)]
    environment: Vec<EnvironmentVariable>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentVariable {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: serde_json::Value,
}

impl EnvironmentVariable {
    fn has_value(&self) -> bool {
        match &self.value {
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Null => false,
            _ => true,
        }
    }
}

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS013",
        Severity::Error,
        "Task definition defines sensitive environment variable(s).",
        Target::resources(&["aws_ecs_task_definition"]),
        |report, block| {
            let Some(definitions) = block.attribute("container_definitions") else {
                return Ok(());
            };
            let Some(json) = definitions.value.as_str() else {
                return Ok(());
            };

            let containers: Vec<ContainerDefinition> =
                serde_json::from_str(json).map_err(|e| CheckError::MalformedValue {
                    attribute: definitions.name.clone(),
                    message: e.to_string(),
                })?;

            for variable in containers.iter().flat_map(|c| &c.environment) {
                if is_sensitive_name(&variable.name) && variable.has_value() {
                    report.at_attribute(
                        definitions,
                        format!(
                            "Resource '{}' includes a potentially sensitive environment variable '{}' in the container definition.",
                            block.display_name(),
                            variable.name
                        ),
                    );
                }
            }
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{check_errors, run_check};

    #[test]
    fn test_sensitive_environment() {
        let results = run_check(
            &check(),
            r#"
resource "aws_ecs_task_definition" "service" {
  family                = "service"
  container_definitions = <<DEFS
[
  {
    "name": "app",
    "image": "app:1.0",
    "environment": [
      { "name": "ENVIRONMENT", "value": "production" },
      { "name": "DB_PASSWORD", "value": "hunter2" }
    ]
  }
]
DEFS
}
"#,
        );
        assert_eq!(results.len(), 1);
        assert!(results[0].description.contains("DB_PASSWORD"));
        assert_eq!(results[0].range.start_line, 4);
    }

    #[test]
    fn test_harmless_environment() {
        let results = run_check(
            &check(),
            r#"
resource "aws_ecs_task_definition" "service" {
  container_definitions = "[{\"name\": \"app\", \"environment\": [{\"name\": \"PORT\", \"value\": \"80\"}, {\"name\": \"TOKEN\", \"value\": \"\"}]}]"
}
"#,
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_unresolved_definitions() {
        let results = run_check(
            &check(),
            "resource \"aws_ecs_task_definition\" \"s\" {\n  container_definitions = file(\"defs.json\")\n}\n",
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let errors = check_errors(
            &check(),
            "resource \"aws_ecs_task_definition\" \"s\" {\n  container_definitions = \"[{\"\n}\n",
        );
        assert!(matches!(errors.as_slice(), [CheckError::MalformedValue { .. }]));
    }
}
