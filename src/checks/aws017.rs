//! AWS017: S3 bucket is not encrypted at rest

use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS017",
        Severity::Warning,
        "Unencrypted S3 bucket.",
        Target::resources(&["aws_s3_bucket"]),
        |report, block| {
            if block.child("server_side_encryption_configuration").is_none() {
                report.at_block(
                    block,
                    format!(
                        "Resource '{}' defines an unencrypted S3 bucket.",
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
    fn test_unencrypted_bucket() {
        let results = run_check(&check(), "resource \"aws_s3_bucket\" \"b\" {\n}\n");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_encrypted_bucket() {
        let results = run_check(
            &check(),
            r#"
resource "aws_s3_bucket" "b" {
  server_side_encryption_configuration {
    rule {
      apply_server_side_encryption_by_default {
        sse_algorithm = "aws:kms"
      }
    }
  }
}
"#,
        );
        assert!(results.is_empty());
    }
}
