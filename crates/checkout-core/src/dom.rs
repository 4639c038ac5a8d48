//! # DOM Environment
//!
//! The handful of DOM operations a checkout button needs, behind a trait so
//! button strategies run against a real document in the browser and against
//! [`MemoryDom`] everywhere else.

use crate::error::{CheckoutError, CheckoutResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Click listener registered on a mounted control.
///
/// Listener removal matches by identity, so a strategy creates its handler
/// once and passes clones of the same `Rc` to add and remove.
pub type ClickHandler = Rc<dyn Fn() -> CheckoutResult<()>>;

/// True when both handles point at the same listener
pub fn same_handler(a: &ClickHandler, b: &ClickHandler) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Document operations used to mount and unmount checkout buttons
pub trait DomEnvironment {
    /// Handle to an element in this environment
    type Element: Clone;

    /// Find an attached element by its `id` attribute
    fn query_by_id(&self, id: &str) -> Option<Self::Element>;

    fn create_element(&self, tag: &str) -> CheckoutResult<Self::Element>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str)
        -> CheckoutResult<()>;

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> CheckoutResult<()>;

    fn parent_of(&self, element: &Self::Element) -> Option<Self::Element>;

    fn remove_child(&self, parent: &Self::Element, child: &Self::Element) -> CheckoutResult<()>;

    fn add_click_listener(&self, element: &Self::Element, handler: &ClickHandler)
        -> CheckoutResult<()>;

    fn remove_click_listener(
        &self,
        element: &Self::Element,
        handler: &ClickHandler,
    ) -> CheckoutResult<()>;
}

impl<T: DomEnvironment + ?Sized> DomEnvironment for Rc<T> {
    type Element = T::Element;

    fn query_by_id(&self, id: &str) -> Option<Self::Element> {
        (**self).query_by_id(id)
    }

    fn create_element(&self, tag: &str) -> CheckoutResult<Self::Element> {
        (**self).create_element(tag)
    }

    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> CheckoutResult<()> {
        (**self).set_attribute(element, name, value)
    }

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> CheckoutResult<()> {
        (**self).append_child(parent, child)
    }

    fn parent_of(&self, element: &Self::Element) -> Option<Self::Element> {
        (**self).parent_of(element)
    }

    fn remove_child(&self, parent: &Self::Element, child: &Self::Element) -> CheckoutResult<()> {
        (**self).remove_child(parent, child)
    }

    fn add_click_listener(
        &self,
        element: &Self::Element,
        handler: &ClickHandler,
    ) -> CheckoutResult<()> {
        (**self).add_click_listener(element, handler)
    }

    fn remove_click_listener(
        &self,
        element: &Self::Element,
        handler: &ClickHandler,
    ) -> CheckoutResult<()> {
        (**self).remove_click_listener(element, handler)
    }
}

/// Element handle in a [`MemoryDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

struct MemoryNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<ClickHandler>,
}

impl MemoryNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

/// Headless document for tests and non-browser hosts.
///
/// Node 0 is the `body`; only nodes reachable from it are found by
/// [`DomEnvironment::query_by_id`].
///
/// Nodes are never reclaimed: a removed node keeps its id so callers can
/// still inspect it, and every mount adds one node. Fine for tests and
/// one-shot runs; a long-lived host should create a fresh `MemoryDom`
/// rather than cycle buttons on one forever.
pub struct MemoryDom {
    nodes: RefCell<Vec<MemoryNode>>,
}

impl MemoryDom {
    const BODY: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![MemoryNode::new("body")]),
        }
    }

    pub fn body(&self) -> NodeId {
        Self::BODY
    }

    /// Nodes ever created, attached or not
    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Append a `div` with the given id to the body and return it
    pub fn add_container(&self, id: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let node = NodeId(nodes.len());
        let mut div = MemoryNode::new("div");
        div.attributes.insert("id".to_string(), id.to_string());
        div.parent = Some(Self::BODY);
        nodes.push(div);
        nodes[Self::BODY.0].children.push(node);
        node
    }

    /// Dispatch a click: every listener runs, the first failure is returned
    pub fn click(&self, node: NodeId) -> CheckoutResult<()> {
        // Listeners may touch the DOM, so release the borrow before calling them.
        let listeners = self.with_node(node, |n| n.listeners.clone())?;

        let mut result = Ok(());
        for listener in listeners {
            if let Err(err) = listener() {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.with_node(node, |n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_node(node, |n| n.attributes.get(name).cloned())
            .ok()
            .flatten()
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.with_node(node, |n| n.tag.clone()).ok()
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.with_node(node, |n| n.listeners.len()).unwrap_or(0)
    }

    /// Whether the node is reachable from the body
    pub fn is_connected(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == Self::BODY {
                return true;
            }
            current = nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    /// Connected elements with the given tag, in document order
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut found = Vec::new();
        let mut stack = vec![Self::BODY];
        while let Some(id) = stack.pop() {
            let node = &nodes[id.0];
            if node.tag == tag {
                found.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    fn with_node<R>(&self, node: NodeId, f: impl FnOnce(&MemoryNode) -> R) -> CheckoutResult<R> {
        let nodes = self.nodes.borrow();
        nodes
            .get(node.0)
            .map(f)
            .ok_or_else(|| CheckoutError::Dom(format!("unknown node {}", node.0)))
    }

    fn with_node_mut<R>(
        &self,
        node: NodeId,
        f: impl FnOnce(&mut MemoryNode) -> R,
    ) -> CheckoutResult<R> {
        let mut nodes = self.nodes.borrow_mut();
        nodes
            .get_mut(node.0)
            .map(f)
            .ok_or_else(|| CheckoutError::Dom(format!("unknown node {}", node.0)))
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl DomEnvironment for MemoryDom {
    type Element = NodeId;

    fn query_by_id(&self, id: &str) -> Option<NodeId> {
        let candidates: Vec<NodeId> = {
            let nodes = self.nodes.borrow();
            (0..nodes.len())
                .filter(|&i| nodes[i].attributes.get("id").map(String::as_str) == Some(id))
                .map(NodeId)
                .collect()
        };
        candidates.into_iter().find(|&node| self.is_connected(node))
    }

    fn create_element(&self, tag: &str) -> CheckoutResult<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(MemoryNode::new(tag));
        Ok(NodeId(nodes.len() - 1))
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> CheckoutResult<()> {
        self.with_node_mut(*element, |n| {
            n.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> CheckoutResult<()> {
        if parent == child {
            return Err(CheckoutError::Dom("cannot append a node to itself".into()));
        }
        let previous = self.with_node(*child, |n| n.parent)?;
        self.with_node(*parent, |_| ())?;

        if let Some(previous) = previous {
            self.with_node_mut(previous, |n| n.children.retain(|c| c != child))?;
        }
        self.with_node_mut(*parent, |n| n.children.push(*child))?;
        self.with_node_mut(*child, |n| n.parent = Some(*parent))
    }

    fn parent_of(&self, element: &NodeId) -> Option<NodeId> {
        self.with_node(*element, |n| n.parent).ok().flatten()
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) -> CheckoutResult<()> {
        if self.parent_of(child) != Some(*parent) {
            return Err(CheckoutError::Dom(format!(
                "node {} is not a child of node {}",
                child.0, parent.0
            )));
        }
        self.with_node_mut(*parent, |n| n.children.retain(|c| c != child))?;
        self.with_node_mut(*child, |n| n.parent = None)
    }

    fn add_click_listener(&self, element: &NodeId, handler: &ClickHandler) -> CheckoutResult<()> {
        self.with_node_mut(*element, |n| {
            // Registering the same listener twice is a no-op, as in browsers.
            if !n.listeners.iter().any(|l| same_handler(l, handler)) {
                n.listeners.push(Rc::clone(handler));
            }
        })
    }

    fn remove_click_listener(
        &self,
        element: &NodeId,
        handler: &ClickHandler,
    ) -> CheckoutResult<()> {
        self.with_node_mut(*element, |n| {
            n.listeners.retain(|l| !same_handler(l, handler));
        })
    }
}
