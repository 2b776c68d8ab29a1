//! AWS001: S3 bucket has a public ACL
//!
//! `public-read`, `public-read-write` and `website` canned ACLs grant read
//! access to anyone on the internet.

use crate::checks::helpers::string_in;
use crate::checks::{BlockCheck, Report, Target, block_check};
use crate::error::CheckError;
use crate::parser::BlockRef;
use crate::types::Severity;

const PUBLIC_ACLS: &[&str] = &["public-read", "public-read-write", "website"];

pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
    block_check(
        "AWS001",
        Severity::Warning,
        "S3 Bucket has an ACL defined which allows public access.",
        Target::resources(&["aws_s3_bucket"]),
        |report, block| {
            if let Some(acl) = block.attribute("acl").filter(|acl| string_in(acl, PUBLIC_ACLS)) {
                report.at_attribute(
                    acl,
                    format!(
                        "Resource '{}' has an ACL which allows public access.",
                        block.display_name()
                    ),
                );
            }
            Ok(())
        },
    )
}
