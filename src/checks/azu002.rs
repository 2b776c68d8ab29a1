//! AZU002: Network security rule allows inbound traffic from anywhere

use crate::checks::helpers::{is_open_cidr, string_in, string_list};
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

fn is_open_source(prefix: &str) -> bool {
    prefix == "*" || prefix.eq_ignore_ascii_case("internet") || is_open_cidr(prefix)
}

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AZU002",
        Severity::Error,
        "An inbound network security rule allows traffic from the internet.",
        Target::resources(&["azurerm_network_security_rule"]),
        |report, block| {
            let inbound = block
                .attribute("direction")
                .is_some_and(|d| string_in(d, &["Inbound"]));
            let allowed = block
                .attribute("access")
                .is_some_and(|a| string_in(a, &["Allow"]));
            if !inbound || !allowed {
                return Ok(());
            }

            let description = format!(
                "Resource '{}' defines a fully open inbound network security group rule.",
                block.display_name()
            );

            if let Some(prefix) = block.attribute("source_address_prefix") {
                if prefix.value.as_str().is_some_and(is_open_source) {
                    report.at_attribute(prefix, description);
                    return Ok(());
                }
            }
            if let Some(prefixes) = block.attribute("source_address_prefixes") {
                if string_list(prefixes)?.into_iter().any(is_open_source) {
                    report.at_attribute(prefixes, description);
                }
            }
            Ok(())
        },
    )
}
