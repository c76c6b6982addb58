//! CDP-style DOM Node structure consumed by the renderer.
//!
//! The structure matches the Chrome DevTools Protocol DOM.Node layout. Any
//! parser (html5ever, CDP, etc.) can convert its output to this structure.

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// CDATA section node (nodeType = 4)
    CData = 4,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

impl From<u32> for NodeType {
    fn from(value: u32) -> Self {
        match value {
            1 => NodeType::Element,
            3 => NodeType::Text,
            4 => NodeType::CData,
            8 => NodeType::Comment,
            9 => NodeType::Document,
            11 => NodeType::DocumentFragment,
            _ => NodeType::Element, // Default fallback
        }
    }
}

/// A DOM node following the CDP DOM.Node structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g., "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Content for text, CDATA and comment nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    /// Only present for element nodes
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| [k.to_string(), v.to_string()])
            .collect();

        Self {
            attributes: Some(flat_attrs),
            ..Self::element(tag_name)
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::leaf(NodeType::Text, "#text", content)
    }

    /// Create a new CDATA section node
    pub fn cdata(content: &str) -> Self {
        Self::leaf(NodeType::CData, "#cdata-section", content)
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self::leaf(NodeType::Comment, "#comment", content)
    }

    fn leaf(node_type: NodeType, name: &str, content: &str) -> Self {
        Self {
            node_type,
            node_name: name.to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this node carries character data (text or CDATA)
    pub fn is_text(&self) -> bool {
        matches!(self.node_type, NodeType::Text | NodeType::CData)
    }

    /// Check if this node can hold children that render (element, document, fragment)
    pub fn is_container(&self) -> bool {
        matches!(
            self.node_type,
            NodeType::Element | NodeType::Document | NodeType::DocumentFragment
        )
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;

        // CDP stores attributes as flat array: [name, value, name, value, ...]
        attrs
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
            .map(|pair| pair[1].as_str())
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Get all child nodes
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Add a child node, builder style
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Get all text and CDATA content from this node and descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text | NodeType::CData => {
                out.push_str(self.node_value.as_deref().unwrap_or_default());
            }
            NodeType::Comment => {}
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}
