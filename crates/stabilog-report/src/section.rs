//! Legacy attribute tree and its nesting discipline
//!
//! The legacy encoding is a tree of named sections carrying attributes.
//! Sections live in an arena (`LegacyTree::nodes`) and refer to each other
//! by index; `SectionStack` keeps the path of currently open sections and
//! only lets the innermost one be closed.

use std::fmt::{self, Display, Formatter};
use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::Serialize;

use crate::error::ReportError;

/// Index of a section in a [`LegacyTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SectionId(usize);

/// Scalar attribute value. Booleans are written as 0/1 integers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Str(String),
    Int(i32),
    Int64(i64),
    Float(f32),
}

impl AttributeValue {
    /// Integer view of the value, if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(i64::from(*v)),
            AttributeValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => write!(f, "{s}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Int64(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One named section with its attributes and child sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionNode {
    name: String,
    attributes: Vec<(String, AttributeValue)>,
    children: Vec<SectionId>,
}

impl SectionNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in write order.
    pub fn attributes(&self) -> &[(String, AttributeValue)] {
        &self.attributes
    }

    pub fn children(&self) -> &[SectionId] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.attribute(name).and_then(AttributeValue::as_i64)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttributeValue::as_str)
    }
}

/// Arena holding every section of a legacy report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegacyTree {
    nodes: Vec<SectionNode>,
    roots: Vec<SectionId>,
}

impl LegacyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[SectionId] {
        &self.roots
    }

    pub fn node(&self, id: SectionId) -> &SectionNode {
        &self.nodes[id.0]
    }

    /// All sections reached by following `path` from the roots, matching
    /// names at every level, in document order.
    pub fn find(&self, path: &[&str]) -> Vec<&SectionNode> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let mut level: Vec<SectionId> = self
            .roots
            .iter()
            .copied()
            .filter(|id| self.node(*id).name == *first)
            .collect();
        for name in rest {
            level = level
                .iter()
                .flat_map(|id| self.node(*id).children.iter().copied())
                .filter(|id| self.node(*id).name == *name)
                .collect();
        }
        level.into_iter().map(|id| self.node(id)).collect()
    }

    /// First section at `path`, if any.
    pub fn find_first(&self, path: &[&str]) -> Option<&SectionNode> {
        self.find(path).into_iter().next()
    }

    fn push(&mut self, parent: Option<SectionId>, name: &str) -> SectionId {
        let id = SectionId(self.nodes.len());
        self.nodes.push(SectionNode {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn set_attribute(&mut self, id: SectionId, name: &str, value: AttributeValue) {
        self.nodes[id.0].attributes.push((name.to_string(), value));
    }

    /// Renders the tree below a `log` root element carrying the report
    /// identity attributes.
    pub fn to_xml(
        &self,
        client_id: &str,
        app_version: &str,
        session_id: i32,
    ) -> Result<String, ReportError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        let session = session_id.to_string();
        let mut root = BytesStart::new("log");
        root.push_attribute(("clientid", client_id));
        root.push_attribute(("appversion", app_version));
        root.push_attribute(("session", session.as_str()));

        if self.roots.is_empty() {
            write_event(&mut writer, Event::Empty(root))?;
        } else {
            write_event(&mut writer, Event::Start(root))?;
            for id in &self.roots {
                self.write_node(&mut writer, *id)?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new("log")))?;
        }

        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| ReportError::Render(e.to_string()))
    }

    fn write_node(
        &self,
        writer: &mut Writer<Cursor<Vec<u8>>>,
        id: SectionId,
    ) -> Result<(), ReportError> {
        let node = self.node(id);
        let values: Vec<String> = node.attributes.iter().map(|(_, v)| v.to_string()).collect();
        let mut start = BytesStart::new(node.name.as_str());
        for ((key, _), value) in node.attributes.iter().zip(&values) {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if node.children.is_empty() {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        for child in &node.children {
            self.write_node(writer, *child)?;
        }
        write_event(writer, Event::End(BytesEnd::new(node.name.as_str())))
    }
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), ReportError> {
    writer
        .write_event(event)
        .map_err(|e| ReportError::Render(e.to_string()))
}

/// Open-section path over a [`LegacyTree`].
#[derive(Debug, Default)]
pub struct SectionStack {
    tree: LegacyTree,
    open: Vec<SectionId>,
}

impl SectionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `name` as a child of the innermost open section, or as a root
    /// section when none is open, and makes it the innermost.
    pub fn open(&mut self, name: &str) -> SectionId {
        let id = self.tree.push(self.current(), name);
        self.open.push(id);
        id
    }

    /// Closes `id`, which must be the innermost open section.
    pub fn close(&mut self, id: SectionId) -> Result<(), ReportError> {
        match self.open.last() {
            Some(top) if *top == id => {
                self.open.pop();
                Ok(())
            }
            Some(top) => Err(ReportError::SectionNesting {
                expected: self.tree.node(id).name.clone(),
                found: self.tree.node(*top).name.clone(),
            }),
            None => Err(ReportError::SectionNesting {
                expected: self.tree.node(id).name.clone(),
                found: "<none>".to_string(),
            }),
        }
    }

    /// Innermost open section.
    pub fn current(&self) -> Option<SectionId> {
        self.open.last().copied()
    }

    /// Number of open sections.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Adds an attribute to the innermost open section. Returns `false`
    /// when no section is open.
    pub fn write(&mut self, name: &str, value: AttributeValue) -> bool {
        match self.current() {
            Some(id) => {
                self.tree.set_attribute(id, name, value);
                true
            }
            None => false,
        }
    }

    pub fn tree(&self) -> &LegacyTree {
        &self.tree
    }

    pub fn into_tree(self) -> LegacyTree {
        self.tree
    }
}
