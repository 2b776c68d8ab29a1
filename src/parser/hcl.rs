//! Conversion of a single HCL source file into [`Blocks`].

use super::block::{Attribute, Block, BlockId, Blocks};
use super::lexer::mask_overflowing_numbers;
use super::lines::LineIndex;
use super::value::resolve;
use crate::error::ParseError;
use crate::pragma::InlineIgnores;
use crate::types::Range;
use hcl_edit::Span;
use hcl_edit::structure::{self, BlockLabel, Body, Structure};

/// Parse one file's source text. `filename` is recorded in every range.
///
/// Number literals beyond the `f64` range resolve to [`Value::Unresolved`]
/// instead of failing the parse.
///
/// [`Value::Unresolved`]: super::value::Value::Unresolved
pub fn parse_source(filename: &str, source: &str) -> Result<Blocks, ParseError> {
    let input = mask_overflowing_numbers(source);
    let body = hcl_edit::parser::parse_body(&input).map_err(|e| ParseError::Syntax {
        file: filename.to_string(),
        message: e.to_string(),
    })?;

    let mut builder = TreeBuilder {
        filename,
        lines: LineIndex::new(source),
        blocks: Blocks::new(),
    };
    builder.add_body(&body, None)?;

    let mut blocks = builder.blocks;
    blocks.add_file(filename, source);
    blocks.set_ignores(InlineIgnores::extract(filename, source));
    Ok(blocks)
}

struct TreeBuilder<'a> {
    filename: &'a str,
    lines: LineIndex,
    blocks: Blocks,
}

impl TreeBuilder<'_> {
    /// Add every block of `body` under `parent`. Top-level attributes (as found
    /// in `.tfvars`-style files) have no owning block and are skipped.
    fn add_body(&mut self, body: &Body, parent: Option<BlockId>) -> Result<(), ParseError> {
        for structure in body.iter() {
            if let Structure::Block(block) = structure {
                self.add_block(block, parent)?;
            }
        }
        Ok(())
    }

    fn add_block(
        &mut self,
        block: &structure::Block,
        parent: Option<BlockId>,
    ) -> Result<(), ParseError> {
        let labels = block
            .labels
            .iter()
            .map(|label| match label {
                BlockLabel::String(s) => s.value().to_string(),
                BlockLabel::Ident(ident) => ident.as_str().to_string(),
            })
            .collect();

        let mut node = Block::new(block.ident.as_str(), labels, self.range_of(block.span()));

        for structure in block.body.iter() {
            let Structure::Attribute(attr) = structure else {
                continue;
            };
            let attribute = Attribute {
                name: attr.key.as_str().to_string(),
                value: resolve(&attr.value),
                range: self.range_of(attr.span()),
            };
            if let Some(first) = node.attributes.get(&attribute.name) {
                return Err(ParseError::DuplicateAttribute {
                    file: self.filename.to_string(),
                    name: attribute.name,
                    line: attribute.range.start_line,
                    first_line: first.range.start_line,
                });
            }
            node.attributes.insert(attribute.name.clone(), attribute);
        }

        log::trace!("{}: {} block at {}", self.filename, node.kind, node.range);
        let id = self.blocks.push(node, parent);
        self.add_body(&block.body, Some(id))
    }

    fn range_of(&self, span: Option<std::ops::Range<usize>>) -> Range {
        match span {
            Some(span) => self.lines.range(self.filename, &span),
            None => self.lines.whole_file(self.filename),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::value::Value;

    const BUCKET: &str = r#"
resource "aws_s3_bucket" "logs" {
  bucket = "my-logs"
  acl    = "public-read"

  logging {
    target_bucket = "audit"
  }
}

variable "region" {
  default = "eu-west-1"
}
"#;

    #[test]
    fn test_blocks_and_ranges() {
        let blocks = parse_source("main.tf", BUCKET).unwrap();
        let roots: Vec<_> = blocks.roots().collect();
        assert_eq!(roots.len(), 2);

        let bucket = roots[0];
        assert_eq!(bucket.kind(), "resource");
        assert_eq!(bucket.labels(), ["aws_s3_bucket", "logs"]);
        assert_eq!((bucket.range().start_line, bucket.range().end_line), (2, 9));
        assert_eq!(bucket.range().filename, "main.tf");

        let acl = bucket.attribute("acl").unwrap();
        assert_eq!(acl.value, Value::String("public-read".into()));
        assert_eq!((acl.range.start_line, acl.range.end_line), (4, 4));

        let logging = bucket.child("logging").unwrap();
        assert_eq!((logging.range().start_line, logging.range().end_line), (6, 8));
        assert_eq!(logging.parent().unwrap().id(), bucket.id());

        let variable = roots[1];
        assert_eq!(variable.full_name(), "variable.region");
        assert_eq!((variable.range().start_line, variable.range().end_line), (11, 13));
    }

    #[test]
    fn test_children_keep_source_order() {
        let source = r#"
resource "aws_security_group" "web" {
  ingress { from_port = 22 }
  description = "web"
  egress { from_port = 0 }
  ingress { from_port = 443 }
}
"#;
        let blocks = parse_source("sg.tf", source).unwrap();
        let sg = blocks.roots().next().unwrap();
        let kinds: Vec<_> = sg.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec!["ingress", "egress", "ingress"]);
        assert_eq!(sg.children_of_kind("ingress").count(), 2);
    }

    #[test]
    fn test_unbalanced_braces_is_syntax_error() {
        let err = parse_source("broken.tf", "resource \"a\" \"b\" {\n  x = 1\n").unwrap_err();
        match err {
            ParseError::Syntax { file, .. } => assert_eq!(file, "broken.tf"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_attribute_is_error() {
        let err = parse_source("dup.tf", "resource \"a\" \"b\" {\n  x = 1\n  x = 2\n}\n").unwrap_err();
        match err {
            ParseError::DuplicateAttribute {
                name,
                line,
                first_line,
                ..
            } => {
                assert_eq!(name, "x");
                assert_eq!((line, first_line), (3, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_number_is_unresolved() {
        let source = "resource \"aws_sqs_queue\" \"q\" {\n  big   = 1e400\n  small = -2.5e-3\n  label = \"1e400\"\n}\n";
        let blocks = parse_source("main.tf", source).unwrap();
        let queue = blocks.walk()[0];

        let big = queue.attribute("big").unwrap();
        assert!(big.value.is_unresolved());
        assert_eq!(big.range.start_line, 2);
        assert_eq!(queue.attribute("small").unwrap().value, Value::Number(-0.0025));
        assert_eq!(
            queue.attribute("label").unwrap().value,
            Value::String("1e400".to_string())
        );
        assert_eq!(blocks.source("main.tf"), Some(source));
    }

    #[test]
    fn test_empty_source() {
        let blocks = parse_source("empty.tf", "").unwrap();
        assert!(blocks.is_empty());
        assert_eq!(blocks.source("empty.tf"), Some(""));
    }

    #[test]
    fn test_ignores_are_collected() {
        let blocks = parse_source(
            "main.tf",
            "# tfsec:ignore:AWS002\nresource \"aws_s3_bucket\" \"b\" {}\n",
        )
        .unwrap();
        assert!(blocks.ignores().is_ignored("main.tf", 2, &"AWS002".into()));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_never_panics(source in "[a-z0-9_ =\"{}\\[\\]#\n.,]{0,200}") {
                let _ = parse_source("fuzz.tf", &source);
            }

            #[test]
            fn literal_attributes_resolve(
                name in "[a-z][a-z_]{0,10}",
                number in -1000i64..1000,
                text in "[a-zA-Z0-9 ]{0,20}",
            ) {
                let source = format!(
                    "resource \"t\" \"n\" {{\n  {name}_n = {number}\n  {name}_s = \"{text}\"\n}}\n"
                );
                let blocks = parse_source("gen.tf", &source).unwrap();
                let block = blocks.walk()[0];
                let n = block.attribute(&format!("{name}_n")).unwrap();
                let s = block.attribute(&format!("{name}_s")).unwrap();
                prop_assert_eq!(&n.value, &Value::Number(number as f64));
                prop_assert_eq!(&s.value, &Value::String(text.clone()));
                prop_assert_eq!(n.range.start_line, 2);
                prop_assert_eq!(s.range.start_line, 3);
            }
        }
    }
}
