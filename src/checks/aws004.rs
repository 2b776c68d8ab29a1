//! AWS004: Load balancer listener uses plain HTTP

use crate::checks::helpers::string_in;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS004",
        Severity::Warning,
        "Use of plain HTTP.",
        Target::resources(&["aws_lb_listener", "aws_alb_listener"]),
        |report, block| {
            if let Some(protocol) = block.attribute("protocol").filter(|p| string_in(p, &["HTTP"])) {
                // Listeners that only redirect to HTTPS are fine
                if redirects_to_https(block) {
                    return Ok(());
                }
                report.at_attribute(
                    protocol,
                    format!(
                        "Resource '{}' uses plain HTTP instead of HTTPS.",
                        block.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}

fn redirects_to_https(block: BlockRef<'_>) -> bool {
    block.children_of_kind("default_action").any(|action| {
        action
            .child("redirect")
            .and_then(|redirect| redirect.attribute("protocol"))
            .is_some_and(|p| string_in(p, &["HTTPS"]))
    })
}
