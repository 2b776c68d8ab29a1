//! AWS014: Launch configuration with unencrypted block devices
//!
//! The root device must be declared and encrypted, as must every additional
//! EBS device.

use crate::checks::helpers::as_bool;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS014",
        Severity::Warning,
        "Launch configuration with unencrypted block device.",
        Target::resources(&["aws_launch_configuration"]),
        |report, block| {
            let name = block.display_name();

            if block.child("root_block_device").is_none() {
                report.at_block(
                    block,
                    format!("Resource '{}' uses an unencrypted root EBS block device.", name),
                );
            }

            for device in block
                .children()
                .filter(|c| matches!(c.kind(), "root_block_device" | "ebs_block_device"))
            {
                let description = if device.kind() == "root_block_device" {
                    format!("Resource '{}' uses an unencrypted root EBS block device.", name)
                } else {
                    format!("Resource '{}' uses an unencrypted EBS block device.", name)
                };
                match device.attribute("encrypted") {
                    None => {
                        report.at_block(device, description);
                    }
                    Some(encrypted) if as_bool(&encrypted.value) == Some(false) => {
                        report.at_attribute(encrypted, description);
                    }
                    Some(_) => {}
                }
            }
            Ok(())
        },
    )
}
