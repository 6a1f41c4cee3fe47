/// The outcome of asking a `Node` to delete a key from its subtree.
pub(crate) enum DeleteResult<L> {
    /// The key wasn't found so nothing was deleted.
    NotFound,
    /// The `Node` returning this holds the key and had at most one child. Its parent should put
    /// the `L` (that child, or nothing) into the slot that held it.
    ReplaceSelf(L),
    /// A node further down the subtree was deleted and already unlinked.
    DeletedChild,
}
