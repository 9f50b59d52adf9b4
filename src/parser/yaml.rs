//! Values-file YAML parsing — marked event stream to `ValueNode` tree.
//!
//! serde_yaml is fine for the fixed-shape manifest files, but the values
//! table needs source positions (for file-order sorting) and scalar quoting
//! (for type inference), so values files go through yaml-rust2's marked
//! parser and a small tree builder instead.

use crate::model::{NodeValue, ValueNode};
use anyhow::{bail, Result};
use std::collections::HashMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse the text of a values file into its document tree.
///
/// Returns `Ok(None)` for an empty document (no content at all), which the
/// caller skips without producing any rows.
pub fn parse_tree(input: &str) -> Result<Option<ValueNode>> {
    let mut parser = Parser::new_from_str(input);
    let mut builder = TreeBuilder::default();
    parser.load(&mut builder, false)?;

    if let Some(msg) = builder.error {
        bail!("invalid values document: {}", msg);
    }

    Ok(builder.documents.into_iter().next())
}

// -- Tree builder -------------------------------------------------------------

#[derive(Default)]
struct TreeBuilder {
    documents: Vec<ValueNode>,
    stack: Vec<Frame>,
    /// Anchored nodes by anchor id, for alias resolution
    anchors: HashMap<usize, ValueNode>,
    error: Option<String>,
}

enum Frame {
    Mapping {
        pairs: Vec<(String, ValueNode)>,
        pending_key: Option<String>,
        anchor: usize,
        line: usize,
        column: usize,
    },
    Sequence {
        items: Vec<ValueNode>,
        anchor: usize,
        line: usize,
        column: usize,
    },
}

impl TreeBuilder {
    fn attach(&mut self, node: ValueNode, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }

        match self.stack.last_mut() {
            None => self.documents.push(node),
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                pairs, pending_key, ..
            }) => match pending_key.take() {
                Some(key) => pairs.push((key, node)),
                None => match node.value {
                    NodeValue::Scalar { text, .. } => *pending_key = Some(text),
                    _ => {
                        if self.error.is_none() {
                            self.error = Some(format!(
                                "non-scalar mapping key at line {}",
                                node.line
                            ));
                        }
                    }
                },
            },
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::Scalar(text, style, anchor, _tag) => {
                let quoted = matches!(
                    style,
                    TScalarStyle::SingleQuoted | TScalarStyle::DoubleQuoted
                );
                let node = ValueNode {
                    value: NodeValue::Scalar { text, quoted },
                    line: mark.line(),
                    column: mark.col(),
                };
                self.attach(node, anchor);
            }
            Event::MappingStart(anchor, _tag) => {
                self.stack.push(Frame::Mapping {
                    pairs: Vec::new(),
                    pending_key: None,
                    anchor,
                    line: mark.line(),
                    column: mark.col(),
                });
            }
            Event::MappingEnd => {
                if let Some(Frame::Mapping {
                    pairs,
                    anchor,
                    line,
                    column,
                    ..
                }) = self.stack.pop()
                {
                    let node = ValueNode {
                        value: NodeValue::Mapping(pairs),
                        line,
                        column,
                    };
                    self.attach(node, anchor);
                }
            }
            Event::SequenceStart(anchor, _tag) => {
                self.stack.push(Frame::Sequence {
                    items: Vec::new(),
                    anchor,
                    line: mark.line(),
                    column: mark.col(),
                });
            }
            Event::SequenceEnd => {
                if let Some(Frame::Sequence {
                    items,
                    anchor,
                    line,
                    column,
                }) = self.stack.pop()
                {
                    let node = ValueNode {
                        value: NodeValue::Sequence(items),
                        line,
                        column,
                    };
                    self.attach(node, anchor);
                }
            }
            Event::Alias(anchor) => {
                // Aliases reuse the anchored node, keeping its original
                // source position
                let node = self.anchors.get(&anchor).cloned().unwrap_or(ValueNode {
                    value: NodeValue::Scalar {
                        text: String::new(),
                        quoted: false,
                    },
                    line: mark.line(),
                    column: mark.col(),
                });
                self.attach(node, 0);
            }
            _ => {}
        }
    }
}
