//! AWS003: Classic (EC2-Classic) security groups
//!
//! These resources only exist for EC2-Classic networking; a VPC should be used
//! instead.

use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS003",
        Severity::Warning,
        "AWS Classic resource usage.",
        Target::resources(&[
            "aws_db_security_group",
            "aws_redshift_security_group",
            "aws_elasticache_security_group",
        ]),
        |report, block| {
            report.at_block(
                block,
                format!(
                    "Resource '{}' uses EC2 Classic. Use a VPC instead.",
                    block.display_name()
                ),
            );
            Ok(())
        },
    )
}
