//! GEN002: Sensitive attribute set to a literal value
//!
//! Applies to every block, including nested ones such as `provider` settings.

use crate::checks::helpers::{is_sensitive_name, literal_string};
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "GEN002",
        Severity::Warning,
        "Potentially sensitive data stored in block attribute.",
        Target::Any,
        |report, block| {
            // Variable defaults are covered by GEN001
            if block.kind() == "variable" {
                return Ok(());
            }
            for attribute in block.attributes() {
                if is_sensitive_name(&attribute.name) && literal_string(&attribute.value).is_some() {
                    report.at_attribute(
                        attribute,
                        format!(
                            "Block '{}' includes a potentially sensitive attribute which is defined within the project.",
                            qualified_name(block)
                        ),
                    );
                }
            }
            Ok(())
        },
    )
}

/// `aws_db_instance.main/master_settings` for nested blocks.
fn qualified_name(block: BlockRef<'_>) -> String {
    let mut parts: Vec<String> = block.ancestors().map(|a| a.display_name()).collect();
    parts.reverse();
    parts.push(block.display_name());
    parts.join("/")
}
