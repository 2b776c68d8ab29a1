//! AWS002: S3 bucket does not have logging enabled

use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS002",
        Severity::Info,
        "S3 Bucket does not have logging enabled.",
        Target::resources(&["aws_s3_bucket"]),
        |report, block| {
            if block.child("logging").is_none() {
                report.at_block(
                    block,
                    format!(
                        "Resource '{}' does not have logging enabled.",
                        block.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
