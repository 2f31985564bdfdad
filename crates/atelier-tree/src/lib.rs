//! Instance tree for the Atelier visual site builder.
//!
//! A project is a tree of visual *instances*: every element the user can
//! select and style is a node carrying the name of the component it renders
//! (`Box`, `Heading`, `Paragraph`, ...). Style declarations reference
//! instances by id; the style engine walks ancestor chains to resolve
//! inherited properties.
//!
//! # Design
//!
//! The tree uses arena allocation with [`InstanceId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Parent links are maintained alongside ordered child lists, and
//! attachment is only possible through [`InstanceTree::append_child`], which
//! keeps the structure an acyclic tree by construction.

/// A type-safe index into the instance tree.
///
/// Provides O(1) access to any instance without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub usize);

impl InstanceId {
    /// The root instance (the page body) is always at index 0.
    pub const ROOT: InstanceId = InstanceId(0);
}

/// A single node in the instance tree.
///
/// Stores indices for parent/child relationships, enabling O(1) traversal
/// in either direction.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Name of the component this instance renders. Used to look up
    /// component preset styles and HTML tag defaults.
    pub component: String,

    /// Optional user-facing label shown in the navigator panel.
    pub label: Option<String>,

    /// Parent instance, `None` only for the root.
    pub parent: Option<InstanceId>,

    /// Ordered list of child instances.
    pub children: Vec<InstanceId>,
}

/// Arena-based instance tree with O(1) access and traversal.
///
/// All instances live in a contiguous vector indexed by [`InstanceId`].
/// The root instance is always at index 0. A node can be attached at most
/// once; `append_child` refuses to re-parent an already attached node or to
/// attach a node to itself or one of its descendants, so the structure stays
/// a tree (no cycles).
#[derive(Debug, Clone)]
pub struct InstanceTree {
    /// All instances in the tree, indexed by `InstanceId`.
    instances: Vec<Instance>,
}

impl InstanceTree {
    /// Create a new tree with just the root instance.
    #[must_use]
    pub fn new(root_component: impl Into<String>) -> Self {
        let root = Instance {
            component: root_component.into(),
            label: None,
            parent: None,
            children: Vec::new(),
        };
        InstanceTree {
            instances: vec![root],
        }
    }

    /// Get the root instance ID.
    #[must_use]
    pub const fn root(&self) -> InstanceId {
        InstanceId::ROOT
    }

    /// Get an instance by its ID.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id.0)
    }

    /// Get a mutable reference to an instance by its ID.
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.instances.get_mut(id.0)
    }

    /// Get the number of instances in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if the tree is empty (never true; the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Allocate a new instance and return its ID.
    /// The instance is not yet attached to the tree.
    pub fn alloc(&mut self, component: impl Into<String>) -> InstanceId {
        let id = InstanceId(self.instances.len());
        self.instances.push(Instance {
            component: component.into(),
            label: None,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`, updating both links.
    ///
    /// Returns `false` (and leaves the tree untouched) when the attachment
    /// would corrupt the structure: unknown ids, an already attached child,
    /// or a child that is `parent` itself or one of its ancestors.
    pub fn append_child(&mut self, parent: InstanceId, child: InstanceId) -> bool {
        if parent.0 >= self.instances.len() || child.0 >= self.instances.len() {
            return false;
        }
        if parent == child || self.instances[child.0].parent.is_some() {
            return false;
        }
        // Attaching an ancestor under its own descendant would close a cycle.
        if self.is_descendant_of(parent, child) {
            return false;
        }

        self.instances[parent.0].children.push(child);
        self.instances[child.0].parent = Some(parent);
        true
    }

    /// Get the parent of an instance.
    #[must_use]
    pub fn parent(&self, id: InstanceId) -> Option<InstanceId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of an instance.
    #[must_use]
    pub fn children(&self, id: InstanceId) -> &[InstanceId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the component name of an instance.
    #[must_use]
    pub fn component(&self, id: InstanceId) -> Option<&str> {
        self.get(id).map(|n| n.component.as_str())
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: InstanceId, ancestor: InstanceId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Iterate over all ancestors of an instance, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: InstanceId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Build the instance selector for `id`: the path `[id, parent, ..., root]`
    /// with the selected instance first.
    ///
    /// This is the addressing form the style engine consumes; inheritance
    /// walks it back-to-front (root toward parent).
    #[must_use]
    pub fn selector_of(&self, id: InstanceId) -> Vec<InstanceId> {
        let mut selector = vec![id];
        selector.extend(self.ancestors(id));
        selector
    }
}

/// Iterator over ancestors of an instance.
pub struct AncestorIterator<'a> {
    tree: &'a InstanceTree,
    current: Option<InstanceId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = InstanceId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
