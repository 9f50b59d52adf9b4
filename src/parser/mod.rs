//! Parsing of values files: comment grammar, YAML tree, row extraction.

pub mod comments;
pub mod rows;
pub mod yaml;

use crate::model::{DescriptionMap, ValueNode};
use anyhow::Result;

/// Parse one values file's text into its structural tree and the comment
/// description map. The two passes are independent reads of the same text.
pub fn parse_values(input: &str) -> Result<(Option<ValueNode>, DescriptionMap)> {
    let tree = yaml::parse_tree(input)?;
    let descriptions = comments::scan_comments(input);
    Ok((tree, descriptions))
}
