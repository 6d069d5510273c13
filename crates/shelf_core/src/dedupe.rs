use std::collections::HashSet;

/// ISBNs for which enrichment has been attempted in this session.
///
/// Membership only grows; there is deliberately no removal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanDeduplicator {
    seen: HashSet<String>,
}

impl ScanDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, isbn: &str) -> bool {
        self.seen.contains(isbn)
    }

    /// Records `isbn`. Returns false if it was already present.
    pub fn add(&mut self, isbn: &str) -> bool {
        if self.seen.contains(isbn) {
            return false;
        }
        self.seen.insert(isbn.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_has() {
        let mut dedup = ScanDeduplicator::new();
        assert!(!dedup.has("9780134190440"));

        assert!(dedup.add("9780134190440"));
        assert!(dedup.has("9780134190440"));
        assert!(!dedup.has("9780131103627"));
    }

    #[test]
    fn second_add_is_a_noop() {
        let mut dedup = ScanDeduplicator::new();
        dedup.add("9780134190440");
        let before = dedup.clone();

        assert!(!dedup.add("9780134190440"));
        assert_eq!(dedup, before);
        assert_eq!(dedup.len(), 1);
    }
}
