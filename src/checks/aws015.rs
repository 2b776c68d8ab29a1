//! AWS015: SQS queue is not encrypted

use crate::checks::helpers::missing_or_empty;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS015",
        Severity::Warning,
        "Unencrypted SQS queue.",
        Target::resources(&["aws_sqs_queue"]),
        |report, block| {
            let description = format!(
                "Resource '{}' defines an unencrypted SQS queue.",
                block.display_name()
            );
            match missing_or_empty(block, "kms_master_key_id") {
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
