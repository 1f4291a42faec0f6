//! Self-balancing index ranking routes by usage frequency.
//!
//! The tree orders entries by [`Route::rank_cmp`] (frequency ascending,
//! node-sequence tie-break). Frequency is a mutable ordering key, so a
//! repeat delivery is never bumped in place: the entry is removed under
//! the key it was filed with, incremented, and reinserted at its new
//! position.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::graph::NodeId;
use crate::route::Route;

type Link = Option<Box<AvlNode>>;

#[derive(Debug)]
struct AvlNode {
    route: Route,
    height: i32,
    left: Link,
    right: Link,
}

impl AvlNode {
    fn new(route: Route) -> Self {
        Self {
            route,
            height: 0,
            left: None,
            right: None,
        }
    }
}

/// AVL tree over [`Route`] entries, ordered by the frequency rank order.
///
/// Alongside the tree, an identity map records the frequency each route
/// was filed under, which keeps removal and lookup by node-sequence
/// identity at O(log n) even though frequency leads the ordering key.
#[derive(Debug, Default)]
pub struct FrequencyIndex {
    root: Link,
    filed: HashMap<Vec<NodeId>, u32>,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.filed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filed.is_empty()
    }

    pub fn contains(&self, nodes: &[NodeId]) -> bool {
        self.filed.contains_key(nodes)
    }

    /// Insert a route, returning its resulting frequency.
    ///
    /// A new identity becomes a leaf placed by the rank order. If the
    /// identity is already indexed, the stored entry is repositioned via
    /// [`FrequencyIndex::bump`] and the incoming instance is discarded;
    /// the stored route keeps its identifier.
    pub fn insert(&mut self, route: Route) -> u32 {
        if self.contains(route.nodes()) {
            if let Some(frequency) = self.bump(route.nodes()) {
                return frequency;
            }
        }
        let frequency = route.frequency();
        self.filed.insert(route.nodes().to_vec(), frequency);
        insert_node(&mut self.root, route);
        frequency
    }

    /// Record one more use of an already-indexed route: remove it under
    /// its filed key, increment its frequency, and reinsert it at the new
    /// position. Returns the updated frequency, or `None` when the
    /// identity is not indexed.
    pub fn bump(&mut self, nodes: &[NodeId]) -> Option<u32> {
        let filed_under = *self.filed.get(nodes)?;
        let mut route = take_node(&mut self.root, filed_under, nodes)?;
        route.increment_frequency();
        let frequency = route.frequency();
        self.filed.insert(route.nodes().to_vec(), frequency);
        insert_node(&mut self.root, route);
        Some(frequency)
    }

    /// Look up a route by its node-sequence identity.
    pub fn get(&self, nodes: &[NodeId]) -> Option<&Route> {
        let filed_under = *self.filed.get(nodes)?;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key_cmp(filed_under, nodes, &node.route) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.route),
            }
        }
        None
    }

    /// Lazy ascending traversal of the indexed routes. The iterator is
    /// restartable: each call starts a fresh pass.
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Defensive invariant check: every balance factor must be in
    /// {-1, 0, 1} and every cached height correct. A violation indicates
    /// a programming defect, not a recoverable runtime condition.
    pub fn check_balanced(&self) -> bool {
        verify(&self.root).is_some()
    }
}

/// In-order iterator over the index, ascending by rank order.
pub struct InOrder<'a> {
    stack: Vec<&'a AvlNode>,
}

impl<'a> InOrder<'a> {
    fn push_left(&mut self, mut link: Option<&'a AvlNode>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Route;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.route)
    }
}

/// Compare a `(frequency, nodes)` probe key against a stored route,
/// consistently with [`Route::rank_cmp`].
fn key_cmp(frequency: u32, nodes: &[NodeId], stored: &Route) -> Ordering {
    frequency
        .cmp(&stored.frequency())
        .then_with(|| nodes.cmp(stored.nodes()))
}

fn height(link: &Link) -> i32 {
    link.as_deref().map_or(-1, |node| node.height)
}

fn update_height(node: &mut AvlNode) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

fn balance_factor(node: &AvlNode) -> i32 {
    height(&node.left) - height(&node.right)
}

fn insert_node(link: &mut Link, route: Route) {
    match link {
        None => *link = Some(Box::new(AvlNode::new(route))),
        Some(node) => {
            // Equal keys cannot occur here: equal rank means equal
            // identity, which insert() routes through bump() instead.
            match route.rank_cmp(&node.route) {
                Ordering::Less => insert_node(&mut node.left, route),
                Ordering::Equal | Ordering::Greater => insert_node(&mut node.right, route),
            }
            rebalance(link);
        }
    }
}

/// Remove and return the route filed under `(frequency, nodes)`.
fn take_node(link: &mut Link, frequency: u32, nodes: &[NodeId]) -> Option<Route> {
    let ordering = {
        let node = link.as_deref()?;
        key_cmp(frequency, nodes, &node.route)
    };

    let removed = match ordering {
        Ordering::Less => take_node(&mut link.as_deref_mut()?.left, frequency, nodes),
        Ordering::Greater => take_node(&mut link.as_deref_mut()?.right, frequency, nodes),
        Ordering::Equal => {
            let mut node = link.take()?;
            *link = match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (Some(left), None) => Some(left),
                (None, Some(right)) => Some(right),
                (Some(left), Some(right)) => {
                    let mut rest: Link = Some(right);
                    if let Some(mut successor) = take_min(&mut rest) {
                        successor.left = Some(left);
                        successor.right = rest;
                        update_height(&mut successor);
                        Some(successor)
                    } else {
                        // The right subtree is non-empty, so a minimum
                        // always exists.
                        Some(left)
                    }
                }
            };
            Some(node.route)
        }
    };

    if removed.is_some() {
        rebalance(link);
    }
    removed
}

/// Detach the minimum node of a subtree, rebalancing on the way out.
fn take_min(link: &mut Link) -> Option<Box<AvlNode>> {
    let node = link.as_deref_mut()?;
    if node.left.is_some() {
        let min = take_min(&mut node.left);
        rebalance(link);
        min
    } else {
        let mut min = link.take()?;
        *link = min.right.take();
        Some(min)
    }
}

/// Restore the AVL invariant at this link after an insert or removal in
/// one of its subtrees. Covers the four rotation cases: left-left,
/// left-right, right-right, right-left.
fn rebalance(link: &mut Link) {
    let factor = match link.as_deref_mut() {
        Some(node) => {
            update_height(node);
            balance_factor(node)
        }
        None => return,
    };

    if factor > 1 {
        let left_leans_right = link
            .as_deref()
            .and_then(|node| node.left.as_deref())
            .is_some_and(|left| balance_factor(left) < 0);
        if left_leans_right {
            if let Some(node) = link.as_deref_mut() {
                rotate_left(&mut node.left);
            }
        }
        rotate_right(link);
    } else if factor < -1 {
        let right_leans_left = link
            .as_deref()
            .and_then(|node| node.right.as_deref())
            .is_some_and(|right| balance_factor(right) > 0);
        if right_leans_left {
            if let Some(node) = link.as_deref_mut() {
                rotate_right(&mut node.right);
            }
        }
        rotate_left(link);
    }
}

fn rotate_left(link: &mut Link) {
    if let Some(mut node) = link.take() {
        match node.right.take() {
            Some(mut pivot) => {
                node.right = pivot.left.take();
                update_height(&mut node);
                pivot.left = Some(node);
                update_height(&mut pivot);
                *link = Some(pivot);
            }
            None => *link = Some(node),
        }
    }
}

fn rotate_right(link: &mut Link) {
    if let Some(mut node) = link.take() {
        match node.left.take() {
            Some(mut pivot) => {
                node.left = pivot.right.take();
                update_height(&mut node);
                pivot.right = Some(node);
                update_height(&mut pivot);
                *link = Some(pivot);
            }
            None => *link = Some(node),
        }
    }
}

/// Returns the subtree height when heights and balance factors are all
/// consistent, `None` on the first violation.
fn verify(link: &Link) -> Option<i32> {
    let node = match link {
        Some(node) => node,
        None => return Some(-1),
    };
    let left = verify(&node.left)?;
    let right = verify(&node.right)?;
    let expected = 1 + left.max(right);
    ((left - right).abs() <= 1 && node.height == expected).then_some(expected)
}
