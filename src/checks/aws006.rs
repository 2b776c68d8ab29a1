//! AWS006: Security group rule allows ingress from the public internet

use crate::checks::helpers::{open_cidr_attribute, string_in};
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub(crate) const CIDR_ATTRIBUTES: &[&str] = &["cidr_blocks", "ipv6_cidr_blocks"];

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS006",
        Severity::Error,
        "An ingress security group rule allows traffic from /0.",
        Target::resources(&["aws_security_group_rule"]),
        |report, block| {
            let is_ingress = block
                .attribute("type")
                .is_some_and(|t| string_in(t, &["ingress"]));
            if !is_ingress {
                return Ok(());
            }
            if let Some(cidr) = open_cidr_attribute(block, CIDR_ATTRIBUTES)? {
                report.at_attribute(
                    cidr,
                    format!(
                        "Resource '{}' defines a fully open ingress security group rule.",
                        block.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
