//! AWS012: Instance has a public IP address

use crate::checks::helpers::attribute_is_true;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS012",
        Severity::Warning,
        "A resource has a public IP address.",
        Target::resources(&["aws_instance", "aws_launch_configuration"]),
        |report, block| {
            if let Some(public_ip) = attribute_is_true(block, "associate_public_ip_address") {
                report.at_attribute(
                    public_ip,
                    format!(
                        "Resource '{}' has a public IP address associated.",
                        block.display_name()
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
    fn test_public_ip() {
        let results = run_check(
            &check(),
            "resource \"aws_instance\" \"web\" {\n  associate_public_ip_address = true\n}\n",
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].range.start_line, 2);
    }

    #[test]
    fn test_no_public_ip() {
        let results = run_check(
            &check(),
            "resource \"aws_launch_configuration\" \"lc\" {\n  associate_public_ip_address = false\n}\n",
        );
        assert!(results.is_empty());
    }
}
