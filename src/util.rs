/// Outcome of physically removing a value from a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HardRemoval {
    /// No node held the value so nothing was removed.
    NotFound,
    /// The node holding the value was spliced out. `was_live` records whether it was logically
    /// present (not tombstoned) before removal so the tree can fix its logical size.
    Removed { was_live: bool },
}

/// Which side of a node to walk towards when looking for an extreme value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
