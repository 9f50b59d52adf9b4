//! Tree walker — flattens a values tree into documentation rows.
//!
//! Depth-first descent in source order. Scalars and empty containers emit
//! one row each; non-empty containers only contribute their key segment to
//! the path of the rows beneath them.

use crate::model::{DescriptionMap, NodeValue, ValueNode, ValueRow};
use anyhow::{bail, Result};

/// Closed set of inferred value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int,
    Float,
    Bool,
    List,
    Object,
    Null,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::List => "list",
            ValueKind::Object => "object",
            ValueKind::Null => "null",
        }
    }
}

/// Infer a scalar's type from its lexical form. Quoted scalars are always
/// strings, plain scalars follow the YAML core schema literals.
fn infer_kind(text: &str, quoted: bool) -> ValueKind {
    if quoted {
        return ValueKind::String;
    }
    match text {
        "" | "~" | "null" | "Null" | "NULL" => return ValueKind::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => return ValueKind::Bool,
        _ => {}
    }
    if text.parse::<i64>().is_ok() {
        return ValueKind::Int;
    }
    // f64 parsing accepts spellings like "inf" and "nan" that YAML plain
    // scalars treat as strings, so require a digit
    if text.parse::<f64>().is_ok() && text.chars().any(|c| c.is_ascii_digit()) {
        return ValueKind::Float;
    }
    ValueKind::String
}

/// Flatten a parsed values document into unordered documentation rows.
///
/// The root must be a mapping; any other root kind is a schema error and
/// yields no rows at all.
pub fn extract_rows(root: &ValueNode, descriptions: &DescriptionMap) -> Result<Vec<ValueRow>> {
    if !root.is_mapping() {
        bail!("values file must resolve to a mapping at the top level");
    }

    let mut rows = Vec::new();
    walk("", root, descriptions, &mut rows);
    Ok(rows)
}

fn walk(prefix: &str, node: &ValueNode, descriptions: &DescriptionMap, rows: &mut Vec<ValueRow>) {
    match &node.value {
        NodeValue::Scalar { text, quoted } => {
            let kind = infer_kind(text, *quoted);
            let auto_default = if kind == ValueKind::Null && text.is_empty() {
                "null".to_string()
            } else {
                text.clone()
            };
            rows.push(make_row(prefix, kind, auto_default, node, descriptions));
        }
        NodeValue::Mapping(pairs) => {
            // An empty mapping is a terminal value, not a container to
            // descend into
            if pairs.is_empty() {
                rows.push(make_row(
                    prefix,
                    ValueKind::Object,
                    "{}".to_string(),
                    node,
                    descriptions,
                ));
                return;
            }
            for (key, child) in pairs {
                let next = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                walk(&next, child, descriptions, rows);
            }
        }
        NodeValue::Sequence(items) => {
            if items.is_empty() {
                rows.push(make_row(
                    prefix,
                    ValueKind::List,
                    "[]".to_string(),
                    node,
                    descriptions,
                ));
                return;
            }
            for (idx, child) in items.iter().enumerate() {
                walk(&format!("{prefix}[{idx}]"), child, descriptions, rows);
            }
        }
    }
}

fn make_row(
    key: &str,
    kind: ValueKind,
    auto_default: String,
    node: &ValueNode,
    descriptions: &DescriptionMap,
) -> ValueRow {
    let mut row = ValueRow {
        key: key.to_string(),
        kind: kind.as_str().to_string(),
        auto_default,
        default: String::new(),
        auto_description: String::new(),
        description: String::new(),
        line: node.line,
        column: node.column,
    };

    if let Some(entry) = descriptions.get(key) {
        row.description = entry.description.clone();
        if !entry.default.is_empty() {
            row.default = entry.default.clone();
        }
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DescriptionMap, ValueDescription};
    use crate::parser::yaml::parse_tree;

    fn rows_for(input: &str) -> Vec<ValueRow> {
        let tree = parse_tree(input).unwrap().unwrap();
        extract_rows(&tree, &DescriptionMap::new()).unwrap()
    }

    #[test]
    fn scalar_leaves() {
        let rows = rows_for("name: app\nreplicas: 3\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "name");
        assert_eq!(rows[0].kind, "string");
        assert_eq!(rows[0].auto_default, "app");
        assert_eq!(rows[1].key, "replicas");
        assert_eq!(rows[1].kind, "int");
        assert_eq!(rows[1].auto_default, "3");
    }

    #[test]
    fn nested_mapping_paths() {
        let rows = rows_for("image:\n  repository: nginx\n  tag: latest\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "image.repository");
        assert_eq!(rows[1].key, "image.tag");
    }

    #[test]
    fn empty_mapping_leaf() {
        let rows = rows_for("foo: {}\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "foo");
        assert_eq!(rows[0].kind, "object");
        assert_eq!(rows[0].auto_default, "{}");
    }

    #[test]
    fn empty_sequence_leaf() {
        let rows = rows_for("tolerations: []\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, "list");
        assert_eq!(rows[0].auto_default, "[]");
    }

    #[test]
    fn nested_list_indices() {
        let rows = rows_for("foo:\n  - 1\n  - 2\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "foo[0]");
        assert_eq!(rows[0].auto_default, "1");
        assert_eq!(rows[1].key, "foo[1]");
        assert_eq!(rows[1].auto_default, "2");
    }

    #[test]
    fn list_of_mappings() {
        let rows = rows_for("ports:\n  - name: http\n    port: 80\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "ports[0].name");
        assert_eq!(rows[1].key, "ports[0].port");
    }

    #[test]
    fn non_mapping_root_is_error() {
        let tree = parse_tree("- 1\n- 2\n").unwrap().unwrap();
        assert!(extract_rows(&tree, &DescriptionMap::new()).is_err());
    }

    #[test]
    fn scalar_root_is_error() {
        let tree = parse_tree("just a string\n").unwrap().unwrap();
        assert!(extract_rows(&tree, &DescriptionMap::new()).is_err());
    }

    #[test]
    fn description_attached_by_key_path() {
        let tree = parse_tree("a:\n  b:\n    c: 1\n").unwrap().unwrap();
        let mut descriptions = DescriptionMap::new();
        descriptions.insert(
            "a.b.c".to_string(),
            ValueDescription {
                description: "does X".to_string(),
                default: "5".to_string(),
            },
        );
        let rows = extract_rows(&tree, &descriptions).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "does X");
        assert_eq!(rows[0].default, "5");
        assert_eq!(rows[0].auto_default, "1");
    }

    #[test]
    fn empty_default_override_not_copied() {
        let tree = parse_tree("foo: 1\n").unwrap().unwrap();
        let mut descriptions = DescriptionMap::new();
        descriptions.insert(
            "foo".to_string(),
            ValueDescription {
                description: "a number".to_string(),
                default: String::new(),
            },
        );
        let rows = extract_rows(&tree, &descriptions).unwrap();
        assert_eq!(rows[0].description, "a number");
        assert_eq!(rows[0].default, "");
    }

    #[test]
    fn quoted_number_is_string() {
        let rows = rows_for("a: \"5\"\nb: '6'\n");
        assert_eq!(rows[0].kind, "string");
        assert_eq!(rows[1].kind, "string");
    }

    #[test]
    fn null_value_forms() {
        let rows = rows_for("a: null\nb: ~\nc:\n");
        assert_eq!(rows[0].kind, "null");
        assert_eq!(rows[0].auto_default, "null");
        assert_eq!(rows[1].kind, "null");
        assert_eq!(rows[2].kind, "null");
        assert_eq!(rows[2].auto_default, "null");
    }

    #[test]
    fn kind_inference_table() {
        assert_eq!(infer_kind("3", false), ValueKind::Int);
        assert_eq!(infer_kind("-7", false), ValueKind::Int);
        assert_eq!(infer_kind("3.5", false), ValueKind::Float);
        assert_eq!(infer_kind("1e3", false), ValueKind::Float);
        assert_eq!(infer_kind("true", false), ValueKind::Bool);
        assert_eq!(infer_kind("False", false), ValueKind::Bool);
        assert_eq!(infer_kind("~", false), ValueKind::Null);
        assert_eq!(infer_kind("hello", false), ValueKind::String);
        assert_eq!(infer_kind("nan", false), ValueKind::String);
        assert_eq!(infer_kind("3", true), ValueKind::String);
    }

    #[test]
    fn completeness_every_leaf_has_one_row() {
        let input = "a: 1\nb:\n  c: 2\n  d: []\ne:\n  - x\n  - y\n";
        let rows = rows_for(input);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["a", "b.c", "b.d", "e[0]", "e[1]"]);
    }
}
