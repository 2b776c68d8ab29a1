//! AWS008: Inline security group ingress from the public internet

use crate::checks::aws006::CIDR_ATTRIBUTES;
use crate::checks::helpers::open_cidr_attribute;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS008",
        Severity::Error,
        "An inline ingress security group rule allows traffic from /0.",
        Target::Block("ingress"),
        |report, block| {
            let Some(group) = block
                .parent()
                .filter(|p| p.is_resource(&["aws_security_group"]))
            else {
                return Ok(());
            };
            if let Some(cidr) = open_cidr_attribute(block, CIDR_ATTRIBUTES)? {
                report.at_attribute(
                    cidr,
                    format!(
                        "Resource '{}' defines a fully open ingress security group.",
                        group.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
