//! An index-based tree stored in an arena.
//!
//! Every link between nodes (parent, siblings, first and last child) is an
//! [`Id`] into the arena rather than a reference, so the owning direction is
//! strictly arena → node and a tree never borrows from itself.  Links live in
//! [`Cell`]s, which lets children be appended through a shared reference to
//! the arena.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A handle to a node allocated in an [`Arena`].
pub struct Id<T>(id_arena::Id<Node<T>>);

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Id<T> {
        *self
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Id({})", self.0.index())
    }
}

/// A node inside an arena tree.
pub struct Node<T> {
    parent: Cell<Option<Id<T>>>,
    previous_sibling: Cell<Option<Id<T>>>,
    next_sibling: Cell<Option<Id<T>>>,
    first_child: Cell<Option<Id<T>>>,
    last_child: Cell<Option<Id<T>>>,

    /// The data held by the node.
    pub data: T,
}

/// Storage for the nodes of one or more trees.
pub type Arena<T> = id_arena::Arena<Node<T>>;

/// Prints only the node's data; the links are indices and say little on
/// their own.
impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node").field("data", &self.data).finish()
    }
}

impl<T> Node<T> {
    fn new(data: T) -> Node<T> {
        Node {
            parent: Cell::new(None),
            previous_sibling: Cell::new(None),
            next_sibling: Cell::new(None),
            first_child: Cell::new(None),
            last_child: Cell::new(None),
            data,
        }
    }
}

/// Allocate a new, unattached node holding `data`.
pub fn alloc<T>(arena: &mut Arena<T>, data: T) -> Id<T> {
    Id(arena.alloc(Node::new(data)))
}

impl<T> Id<T> {
    /// The position of the node in its arena, in allocation order.
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// Return the parent node, unless this node is the root of its tree.
    pub fn parent(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].parent.get()
    }

    /// Return the first child of this node, unless it has no child.
    pub fn first_child(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].first_child.get()
    }

    /// Return the last child of this node, unless it has no child.
    pub fn last_child(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].last_child.get()
    }

    /// Return the previous sibling of this node, unless it is a first child.
    pub fn previous_sibling(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].previous_sibling.get()
    }

    /// Return the next sibling of this node, unless it is a last child.
    pub fn next_sibling(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].next_sibling.get()
    }

    /// Return an iterator of this node and its ancestors.
    pub fn ancestors(self, arena: &Arena<T>) -> Ancestors<'_, T> {
        Ancestors(Some((arena, self)))
    }

    /// Return an iterator of this node's children.
    pub fn children(self, arena: &Arena<T>) -> Children<'_, T> {
        Children(arena[self.0].first_child.get().map(|r| (arena, r)))
    }

    /// Return an iterator of this node's children, in reverse order.
    pub fn reverse_children(self, arena: &Arena<T>) -> ReverseChildren<'_, T> {
        ReverseChildren(arena[self.0].last_child.get().map(|r| (arena, r)))
    }

    /// Append `new_child` to this node, after any existing children.
    ///
    /// `new_child` must not already be attached to a tree.
    pub fn append(self, arena: &Arena<T>, new_child: Id<T>) {
        let node = &arena[self.0];
        let new_child_node = &arena[new_child.0];
        debug_assert!(new_child_node.parent.get().is_none());
        debug_assert!(new_child != self);

        new_child_node.parent.set(Some(self));
        if let Some(last_child) = node.last_child.take() {
            let last_child_node = &arena[last_child.0];
            debug_assert!(last_child_node.next_sibling.get().is_none());
            new_child_node.previous_sibling.set(Some(last_child));
            last_child_node.next_sibling.set(Some(new_child));
        } else {
            debug_assert!(node.first_child.get().is_none());
            node.first_child.set(Some(new_child));
        }
        node.last_child.set(Some(new_child));
    }

    /// Borrow the data held by this node.
    #[inline]
    pub fn data(self, arena: &Arena<T>) -> &T {
        &arena[self.0].data
    }

    /// Mutably borrow the data held by this node.
    #[inline]
    pub fn data_mut(self, arena: &mut Arena<T>) -> &mut T {
        &mut arena[self.0].data
    }
}

macro_rules! axis_iterator {
    (#[$attr:meta] $name:ident : $next:ident) => {
        #[$attr]
        #[derive(Debug)]
        pub struct $name<'a, T>(Option<(&'a Arena<T>, Id<T>)>);

        impl<'a, T> Iterator for $name<'a, T> {
            type Item = Id<T>;

            fn next(&mut self) -> Option<Id<T>> {
                let (arena, id) = self.0.take()?;
                self.0 = arena[id.0].$next.get().map(|r| (arena, r));
                Some(id)
            }
        }
    };
}

axis_iterator! {
    #[doc = "An iterator of a given node and its ancestors."]
    Ancestors: parent
}

axis_iterator! {
    #[doc = "An iterator of the children of a given node."]
    Children: next_sibling
}

axis_iterator! {
    #[doc = "An iterator of the children of a given node, in reverse order."]
    ReverseChildren: previous_sibling
}
