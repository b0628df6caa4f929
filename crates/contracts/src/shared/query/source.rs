use std::collections::HashSet;

/// A record with a stable unique identifier.
pub trait Record {
    fn record_id(&self) -> String;
}

/// Raw records most recently fetched for the current query scope.
///
/// The owner decides between `replace` (new search) and `append`
/// ("load more"); neither touches filter, sort or pagination state.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSource<R> {
    items: Vec<R>,
}

impl<R> Default for CollectionSource<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: Record> CollectionSource<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn replace(&mut self, items: Vec<R>) {
        self.items = items;
    }

    /// Append a further page, skipping records already present.
    ///
    /// Returns the number of records actually added.
    pub fn append(&mut self, items: Vec<R>) -> usize {
        let mut seen: HashSet<String> = self.items.iter().map(Record::record_id).collect();
        let before = self.items.len();
        for item in items {
            if seen.insert(item.record_id()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u32);

    impl Record for Item {
        fn record_id(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_append_skips_duplicates() {
        let mut src = CollectionSource::new(vec![Item(1), Item(2)]);
        let added = src.append(vec![Item(2), Item(3), Item(3)]);
        assert_eq!(added, 1);
        assert_eq!(src.items(), &[Item(1), Item(2), Item(3)]);
    }

    #[test]
    fn test_replace() {
        let mut src = CollectionSource::new(vec![Item(1)]);
        src.replace(vec![Item(7)]);
        assert_eq!(src.items(), &[Item(7)]);
        src.clear();
        assert!(src.is_empty());
    }
}
