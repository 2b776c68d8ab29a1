//! GEN001: Sensitive variable with a default value
//!
//! Defaults are committed alongside the code, so a credential-like variable
//! should never carry one.

use crate::checks::helpers::{is_sensitive_name, literal_string, required_label};
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "GEN001",
        Severity::Warning,
        "Potentially sensitive data stored in \"default\" value of variable.",
        Target::Block("variable"),
        |report, block| {
            let name = required_label(block, 0)?;
            if !is_sensitive_name(name) {
                return Ok(());
            }
            if let Some(default) = block
                .attribute("default")
                .filter(|d| literal_string(&d.value).is_some())
            {
                report.at_attribute(
                    default,
                    format!(
                        "Variable '{}' includes a potentially sensitive default value.",
                        block.full_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
