//! GCP001: Compute disk encryption key in plain text

use crate::checks::helpers::literal_string;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "GCP001",
        Severity::Error,
        "Unencrypted compute disk.",
        Target::Block("disk_encryption_key"),
        |report, block| {
            let Some(disk) = block
                .parent()
                .filter(|p| p.is_resource(&["google_compute_disk"]))
            else {
                return Ok(());
            };
            if let Some(raw_key) = block
                .attribute("raw_key")
                .filter(|k| literal_string(&k.value).is_some())
            {
                report.at_attribute(
                    raw_key,
                    format!(
                        "Resource '{}' defines a disk encryption key using a plaintext raw key.",
                        disk.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
