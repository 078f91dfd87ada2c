//! Evidence tree: the clues the player has collected, kept in sorted order
//!
//! An unbalanced binary search tree keyed by clue text. Ordering is plain
//! byte-wise string comparison, so it is case-sensitive. Inserting a clue
//! that is already filed changes nothing.

use std::cmp::Ordering;

#[derive(Debug)]
struct ClueNode {
    text: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn leaf(text: &str) -> Box<Self> {
        Box::new(Self {
            text: text.to_string(),
            left: None,
            right: None,
        })
    }
}

/// Sorted, duplicate-free collection of clue texts
#[derive(Debug, Default)]
pub struct ClueTree {
    root: Option<Box<ClueNode>>,
    len: usize,
}

impl ClueTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a clue. Returns `false` when the clue was already in the tree,
    /// in which case the tree is left untouched.
    pub fn insert(&mut self, clue: &str) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match clue.cmp(node.text.as_str()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(ClueNode::leaf(clue));
        self.len += 1;
        true
    }

    pub fn contains(&self, clue: &str) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match clue.cmp(node.text.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Clues in ascending order. Each call starts a fresh walk.
    pub fn iter(&self) -> InOrder<'_> {
        let mut walk = InOrder { stack: Vec::new() };
        walk.descend(self.root.as_deref());
        walk
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&ClueNode, usize)> = self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        deepest
    }
}

impl Drop for ClueTree {
    fn drop(&mut self) {
        let mut pending: Vec<Box<ClueNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a ClueTree {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Extend<&'a str> for ClueTree {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, clues: I) {
        for clue in clues {
            self.insert(clue);
        }
    }
}

/// Lazy in-order walk over a [`ClueTree`] using an explicit stack
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> InOrder<'a> {
    fn descend(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(node.right.as_deref());
        Some(node.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collected(tree: &ClueTree) -> Vec<&str> {
        tree.iter().collect()
    }

    /// Every ordering of `items`, generated with Heap's algorithm
    fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
        let mut items = items.to_vec();
        let mut out = vec![items.clone()];
        let mut counters = vec![0; items.len()];
        let mut i = 0;
        while i < items.len() {
            if counters[i] < i {
                if i % 2 == 0 {
                    items.swap(0, i);
                } else {
                    items.swap(counters[i], i);
                }
                out.push(items.clone());
                counters[i] += 1;
                i = 0;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }
        out
    }

    #[test]
    fn empty_tree() {
        let tree = ClueTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.iter().next().is_none());
    }

    #[test]
    fn in_order_is_sorted_for_every_insertion_order() {
        let clues = ["mud", "Glove", "glass", "book", "apple"];
        let mut expected = clues.to_vec();
        expected.sort();

        let orders = permutations(&clues);
        assert_eq!(orders.len(), 120);
        for order in orders {
            let mut tree = ClueTree::new();
            for clue in &order {
                assert!(tree.insert(clue));
            }
            assert_eq!(collected(&tree), expected, "insertion order {:?}", order);
        }
    }

    #[test]
    fn ordering_is_case_sensitive() {
        let mut tree = ClueTree::new();
        tree.extend(["b", "B", "a", "A"]);
        assert_eq!(collected(&tree), ["A", "B", "a", "b"]);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = ClueTree::new();
        tree.extend(["m", "c", "x"]);
        let before = collected(&tree).into_iter().map(str::to_string).collect::<Vec<_>>();
        let height = tree.height();

        assert!(!tree.insert("c"));
        assert!(!tree.insert("m"));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.height(), height);
        assert_eq!(collected(&tree), before);
        assert!(tree.contains("x"));
        assert!(!tree.contains("X"));
    }

    #[test]
    fn traversal_is_restartable() {
        let mut tree = ClueTree::new();
        tree.extend(["delta", "alpha", "charlie", "bravo"]);
        let first: Vec<_> = tree.iter().collect();
        let second: Vec<_> = (&tree).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, ["alpha", "bravo", "charlie", "delta"]);
    }

    #[test]
    fn sorted_insertion_degrades_to_a_list() {
        let clues: Vec<String> = (0..10_000).map(|i| format!("clue {:05}", i)).collect();
        let mut tree = ClueTree::new();
        for clue in &clues {
            tree.insert(clue);
        }
        assert_eq!(tree.height(), clues.len());
        assert!(tree.iter().eq(clues.iter().map(String::as_str)));
    }
}
