//! AWS010: Load balancer listener uses an outdated SSL policy

use crate::checks::helpers::string_in;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

const OUTDATED_POLICIES: &[&str] = &[
    "ELBSecurityPolicy-2015-05",
    "ELBSecurityPolicy-2016-08",
    "ELBSecurityPolicy-TLS-1-0-2015-04",
    "ELBSecurityPolicy-TLS-1-1-2017-01",
];

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS010",
        Severity::Warning,
        "An outdated SSL policy is in use by a load balancer.",
        Target::resources(&["aws_lb_listener", "aws_alb_listener"]),
        |report, block| {
            if let Some(policy) = block
                .attribute("ssl_policy")
                .filter(|p| string_in(p, OUTDATED_POLICIES))
            {
                report.at_attribute(
                    policy,
                    format!(
                        "Resource '{}' is using an outdated SSL policy.",
                        block.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
