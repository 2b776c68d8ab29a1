//! AWS018: Security group or rule has no description

use crate::checks::helpers::missing_or_empty;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS018",
        Severity::Info,
        "Missing description for security group/security group rule.",
        Target::resources(&["aws_security_group", "aws_security_group_rule"]),
        |report, block| {
            let description = format!(
                "Resource '{}' should include a description for auditing purposes.",
                block.display_name()
            );
            match missing_or_empty(block, "description") {
                Some(None) => {
                    report.at_block(block, description);
                }
                Some(Some(empty)) => {
                    report.at_attribute(empty, description);
                }
                None => {}
            }
            Ok(())
        },
    )
}
