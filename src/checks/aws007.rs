//! AWS007: Security group rule allows egress to the public internet

use crate::checks::aws006::CIDR_ATTRIBUTES;
use crate::checks::helpers::{open_cidr_attribute, string_in};
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS007",
        Severity::Warning,
        "An egress security group rule allows traffic to /0.",
        Target::resources(&["aws_security_group_rule"]),
        |report, block| {
            let is_egress = block
                .attribute("type")
                .is_some_and(|t| string_in(t, &["egress"]));
            if !is_egress {
                return Ok(());
            }
            if let Some(cidr) = open_cidr_attribute(block, CIDR_ATTRIBUTES)? {
                report.at_attribute(
                    cidr,
                    format!(
                        "Resource '{}' defines a fully open egress security group rule.",
                        block.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
