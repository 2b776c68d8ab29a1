//! AWS005: Load balancer is exposed to the internet

use crate::checks::helpers::as_bool;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS005",
        Severity::Warning,
        "Load balancer is exposed to the internet.",
        Target::resources(&["aws_lb", "aws_alb", "aws_elb"]),
        |report, block| {
            let description = format!("Resource '{}' is exposed publicly.", block.display_name());
            match block.attribute("internal") {
                None => {
                    report.at_block(block, description);
                }
                Some(internal) if as_bool(&internal.value) == Some(false) => {
                    report.at_attribute(internal, description);
                }
                Some(_) => {}
            }
            Ok(())
        },
    )
}
