//! AZU001: Managed disk encryption explicitly disabled

use crate::checks::helpers::attribute_is_false;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AZU001",
        Severity::Warning,
        "An unencrypted managed disk.",
        Target::Block("encryption_settings"),
        |report, block| {
            let Some(disk) = block
                .parent()
                .filter(|p| p.is_resource(&["azurerm_managed_disk"]))
            else {
                return Ok(());
            };
            if let Some(enabled) = attribute_is_false(block, "enabled") {
                report.at_attribute(
                    enabled,
                    format!(
                        "Resource '{}' defines an unencrypted managed disk.",
                        disk.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::run_check;

    #[test]
    fn test_encryption_disabled() {
        let results = run_check(
            &check(),
            r#"
resource "azurerm_managed_disk" "data" {
  encryption_settings {
    enabled = false
  }
}
"#,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].range.start_line, 4);
        assert!(results[0].description.contains("azurerm_managed_disk.data"));
    }

    #[test]
    fn test_encryption_enabled_or_unset() {
        let results = run_check(
            &check(),
            r#"
resource "azurerm_managed_disk" "a" {
  encryption_settings {
    enabled = true
  }
}

resource "azurerm_managed_disk" "b" {
}

resource "azurerm_storage_account" "c" {
  encryption_settings {
    enabled = false
  }
}
"#,
        );
        assert!(results.is_empty());
    }
}
