//! Retained element tree standing in for the host document.
//!
//! The controller owns one [`ViewTree`] and hands the host a single root
//! [`NodeId`]. Hosts and tests interact with elements the way a user would:
//! read them through the tree, or dispatch a [`ViewEvent`] at them.

/// Height of one line of source text, in layout units.
pub const LINE_HEIGHT: u32 = 16;

/// Opaque handle to an element in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Element kind, the small subset of the host document model this block needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Generic container (`<div>`).
    Container,
    /// Editable multi-line text surface.
    TextArea,
    /// Clickable control.
    Button,
    /// Executable fragment re-hosted into the preview surface.
    Script,
    /// Verbatim markup slot; serialized without escaping.
    Raw,
}

/// Interaction a rendered element routes back to its controller.
///
/// The event-routing substitute for attaching listener closures: re-render
/// binds a fresh action on the freshly built element, and events aimed at
/// elements from an earlier render no longer match and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Text changed in the source surface.
    EditSource,
    /// The mode-switch control was activated.
    SwitchMode,
}

/// A user interaction delivered to the controller by the host event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Input { node: NodeId, value: String },
    Click { node: NodeId },
}

/// One element in the tree. Fields are plain data; structure is managed
/// through [`ViewTree`] so parent/child links stay consistent.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: Tag,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    /// Text content: textarea value, button label, script body, or raw markup.
    pub value: String,
    pub placeholder: String,
    pub visible: bool,
    pub disabled: bool,
    /// Pinned height in layout units; `None` means intrinsic/auto.
    pub height: Option<u32>,
    pub action: Option<Action>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            value: String::new(),
            placeholder: String::new(),
            visible: true,
            disabled: false,
            height: None,
            action: None,
            children: Vec::new(),
        }
    }

    /// Adds a class name unless already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }
}

/// Arena of elements. Detached nodes are kept until the tree is dropped;
/// nothing in the block's lifecycle needs reclamation beyond that.
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: Vec<Element>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    pub fn get_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.0]
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_ne!(parent, child);
        self.nodes[parent.0].children.push(child);
    }

    /// Detaches all children of `parent`, leaving the node itself in place.
    pub fn clear_children(&mut self, parent: NodeId) {
        self.nodes[parent.0].children.clear();
    }

    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        &self.nodes[parent.0].children
    }

    /// First descendant of `root` (including `root`) with the given tag,
    /// in document order.
    pub fn find_by_tag(&self, root: NodeId, tag: Tag) -> Option<NodeId> {
        if self.get(root).tag == tag {
            return Some(root);
        }
        for &child in self.children(root) {
            if let Some(found) = self.find_by_tag(child, tag) {
                return Some(found);
            }
        }
        None
    }

    /// Measured content extent of an element, derived from its text.
    ///
    /// One line per newline-separated segment; a trailing newline opens an
    /// empty final line, matching how a real text surface scrolls.
    pub fn content_height(&self, node: NodeId) -> u32 {
        let lines = self.get(node).value.split('\n').count() as u32;
        lines * LINE_HEIGHT
    }

    /// Serializes the visible tree under `root` as markup. Raw and script
    /// nodes are emitted verbatim; everything else is escaped.
    pub fn to_html(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.write_node(root, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let el = self.get(node);
        if !el.visible {
            return;
        }
        match el.tag {
            Tag::Container => {
                out.push_str("<div");
                self.write_common_attrs(el, out);
                out.push('>');
                for &child in &el.children {
                    self.write_node(child, out);
                }
                out.push_str("</div>");
            }
            Tag::TextArea => {
                out.push_str("<textarea");
                self.write_common_attrs(el, out);
                if !el.placeholder.is_empty() {
                    out.push_str(" placeholder=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(
                        &el.placeholder,
                    ));
                    out.push('"');
                }
                if el.disabled {
                    out.push_str(" disabled");
                }
                out.push('>');
                out.push_str(&html_escape::encode_text(&el.value));
                out.push_str("</textarea>");
            }
            Tag::Button => {
                out.push_str("<button");
                self.write_common_attrs(el, out);
                out.push('>');
                out.push_str(&html_escape::encode_text(&el.value));
                out.push_str("</button>");
            }
            Tag::Script => {
                out.push_str("<script");
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                out.push_str(&el.value);
                out.push_str("</script>");
            }
            Tag::Raw => {
                out.push_str(&el.value);
            }
        }
    }

    fn write_common_attrs(&self, el: &Element, out: &mut String) {
        if !el.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&el.classes.join(" "));
            out.push('"');
        }
        if let Some(height) = el.height {
            out.push_str(&format!(" style=\"height: {height}px\""));
        }
    }
}
