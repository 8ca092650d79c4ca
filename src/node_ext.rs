use godot::classes::Node;
use godot::prelude::*;
use log::error;

/// Typed child lookup for any node.
///
/// `NodePath` construction is cheap, so no lookup cache is kept.
pub trait NodeExt {
    /// Returns the child at `path` as a `T`, or `None` when it does not
    /// exist. A child of the wrong class is logged and yields `None`.
    fn get_node_typed<T>(&self, path: &str) -> Option<Gd<T>>
    where
        T: Inherits<Node>;

    /// Same as [`NodeExt::get_node_typed`] without logging a class mismatch.
    fn try_get_node_typed<T>(&self, path: &str) -> Option<Gd<T>>
    where
        T: Inherits<Node>;
}

impl<N> NodeExt for Gd<N>
where
    N: Inherits<Node>,
{
    fn get_node_typed<T>(&self, path: &str) -> Option<Gd<T>>
    where
        T: Inherits<Node>,
    {
        match lookup(self.upcast_ref::<Node>(), path)?.try_cast::<T>() {
            Ok(node) => Some(node),
            Err(node) => {
                error!(
                    "node '{}' exists but is not of type {}, it is {}",
                    path,
                    T::class_name(),
                    node.get_class()
                );
                None
            }
        }
    }

    fn try_get_node_typed<T>(&self, path: &str) -> Option<Gd<T>>
    where
        T: Inherits<Node>,
    {
        lookup(self.upcast_ref::<Node>(), path)?.try_cast::<T>().ok()
    }
}

fn lookup(node: &Node, path: &str) -> Option<Gd<Node>> {
    let node_path = NodePath::from(path);
    if !node.has_node(&node_path) {
        return None;
    }
    node.get_node_or_null(&node_path)
}
