//! Data model for chart documentation — format-agnostic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Sentinel value carried by separator rows in every field except the
/// file-name-carrying description.
pub const SEPARATOR: &str = "---";

/// One row of the values table.
///
/// Produced by the tree walker, reordered (never mutated) by the sorter,
/// consumed by the renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRow {
    /// Dotted/bracketed key path, e.g. `service.ports[0].name`
    pub key: String,
    /// Inferred type: string, int, float, bool, list, object or null
    #[serde(rename = "type")]
    pub kind: String,
    /// Default derived from the literal value in the values file
    pub auto_default: String,
    /// `@default` override from the comment block, if any
    pub default: String,
    /// Propagated description (normally empty)
    pub auto_description: String,
    /// Description from the comment block, or the source file name on
    /// separator rows
    pub description: String,
    /// Source position, used only by the file-order sort
    #[serde(skip)]
    pub line: usize,
    #[serde(skip)]
    pub column: usize,
}

impl ValueRow {
    /// Boundary marker inserted before each values file's block.
    pub fn separator(file_name: &str) -> Self {
        ValueRow {
            key: SEPARATOR.to_string(),
            kind: SEPARATOR.to_string(),
            auto_default: SEPARATOR.to_string(),
            default: SEPARATOR.to_string(),
            auto_description: SEPARATOR.to_string(),
            description: file_name.to_string(),
            line: 0,
            column: 0,
        }
    }

    pub fn is_separator(&self) -> bool {
        self.key == SEPARATOR
    }
}

/// Description and default override recovered from a values-file comment
/// block for one key path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueDescription {
    pub description: String,
    pub default: String,
}

/// Mapping from key path to its comment-derived documentation.
pub type DescriptionMap = HashMap<String, ValueDescription>;

/// Parsed tree of a values file, preserving node kind, mapping order,
/// scalar quoting and source position.
#[derive(Debug, Clone)]
pub struct ValueNode {
    pub value: NodeValue,
    /// 1-based source line
    pub line: usize,
    /// 0-based source column
    pub column: usize,
}

#[derive(Debug, Clone)]
pub enum NodeValue {
    Scalar {
        text: String,
        /// true for single- or double-quoted scalars (always strings)
        quoted: bool,
    },
    /// (key, child) pairs in source order
    Mapping(Vec<(String, ValueNode)>),
    Sequence(Vec<ValueNode>),
}

impl ValueNode {
    pub fn is_mapping(&self) -> bool {
        matches!(self.value, NodeValue::Mapping(_))
    }
}

/// Sort policy for the values table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Rows keep the order they appear in the values file
    FileOrder,
    /// Rows sorted lexicographically by key path
    AlphaNum,
}

impl SortOrder {
    /// Lenient parse of the `--sort-values-order` flag. Unknown values
    /// warn and fall back to alphanumeric ordering.
    pub fn parse(raw: &str) -> SortOrder {
        match raw {
            "file" => SortOrder::FileOrder,
            "alphanum" => SortOrder::AlphaNum,
            other => {
                log::warn!("invalid sort order {other:?}, defaulting to \"alphanum\"");
                SortOrder::AlphaNum
            }
        }
    }
}

/// Chart.yaml manifest fields used for documentation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartMeta {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    #[serde(rename = "appVersion")]
    pub app_version: String,
    #[serde(rename = "kubeVersion")]
    pub kube_version: String,
    pub name: String,
    pub deprecated: bool,
    pub description: String,
    pub version: String,
    pub home: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    pub sources: Vec<String>,
    pub engine: String,
    pub maintainers: Vec<ChartMaintainer>,
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartMaintainer {
    pub name: String,
    pub email: String,
    pub url: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartDependency {
    pub name: String,
    pub version: String,
    pub repository: String,
    pub alias: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRequirements {
    pub dependencies: Vec<ChartDependency>,
}

/// One values file of a chart: its parsed tree (None when the file is
/// empty) and the comment-derived description map.
#[derive(Debug)]
pub struct ValuesFile {
    pub file_name: String,
    pub tree: Option<ValueNode>,
    pub descriptions: DescriptionMap,
}

/// Everything known about one chart directory.
#[derive(Debug)]
pub struct ChartInfo {
    pub directory: PathBuf,
    pub meta: ChartMeta,
    pub requirements: ChartRequirements,
    pub values: Vec<ValuesFile>,
}
