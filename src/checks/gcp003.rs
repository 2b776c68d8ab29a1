//! GCP003: Firewall allows ingress from the public internet

use crate::checks::helpers::{is_open_cidr, string_list};
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "GCP003",
        Severity::Error,
        "An inbound firewall rule allows traffic from /0.",
        Target::resources(&["google_compute_firewall"]),
        |report, block| {
            let Some(ranges) = block.attribute("source_ranges") else {
                return Ok(());
            };
            if string_list(ranges)?.into_iter().any(is_open_cidr) {
                report.at_attribute(
                    ranges,
                    format!(
                        "Resource '{}' defines a fully open inbound firewall rule.",
                        block.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
