//! AWS011: Database or cluster is publicly accessible

use crate::checks::helpers::attribute_is_true;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS011",
        Severity::Error,
        "A database resource is marked as publicly accessible.",
        Target::resources(&[
            "aws_db_instance",
            "aws_dms_replication_instance",
            "aws_rds_cluster_instance",
            "aws_redshift_cluster",
        ]),
        |report, block| {
            if let Some(public) = attribute_is_true(block, "publicly_accessible") {
                report.at_attribute(
                    public,
                    format!("Resource '{}' is exposed publicly.", block.display_name()),
                );
            }
            Ok(())
        },
    )
}
