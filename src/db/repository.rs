use crate::error::Result;
use crate::models::PredictionRecord;
use std::collections::HashMap;
use std::sync::RwLock;

/// Items addressable by a string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for PredictionRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Narrow storage interface. Stores are injected where needed rather than
/// held in process-wide state.
pub trait Repository<T>: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<T>>;

    /// Inserts or replaces the item under its key.
    fn put(&self, item: T) -> Result<()>;

    /// Returns whether an item was removed.
    fn delete(&self, key: &str) -> Result<bool>;

    fn list(&self) -> Result<Vec<T>>;

    /// Removes every item, returning how many were removed.
    fn clear(&self) -> Result<usize>;
}

/// Volatile store; contents are lost when the process exits.
/// `list` returns items in insertion order.
pub struct InMemoryRepository<T> {
    inner: RwLock<Inner<T>>,
}

struct Inner<T> {
    items: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Result<Option<T>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.items.get(key).cloned())
    }

    fn put(&self, item: T) -> Result<()> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let key = item.key().to_string();
        if inner.items.insert(key.clone(), item).is_none() {
            inner.order.push(key);
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let removed = inner.items.remove(key).is_some();
        if removed {
            inner.order.retain(|k| k != key);
        }
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<T>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .order
            .iter()
            .filter_map(|k| inner.items.get(k).cloned())
            .collect())
    }

    fn clear(&self) -> Result<usize> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let count = inner.items.len();
        inner.items.clear();
        inner.order.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn record(location: &str) -> PredictionRecord {
        PredictionRecord::new(location, Category::Moderate, 0.85, 100.0, 30.0, 45.0)
    }

    #[test]
    fn put_get_delete() {
        let repo = InMemoryRepository::new();
        let rec = record("Huế");
        let id = rec.id.clone();

        repo.put(rec.clone()).unwrap();
        assert_eq!(repo.get(&id).unwrap(), Some(rec));
        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());
        assert_eq!(repo.get(&id).unwrap(), None);
    }

    #[test]
    fn list_keeps_insertion_order_and_replaces_in_place() {
        let repo = InMemoryRepository::new();
        let a = record("A");
        let b = record("B");
        repo.put(a.clone()).unwrap();
        repo.put(b.clone()).unwrap();

        let mut a2 = a.clone();
        a2.location = "A2".into();
        repo.put(a2).unwrap();

        let locations: Vec<String> = repo.list().unwrap().into_iter().map(|r| r.location).collect();
        assert_eq!(locations, vec!["A2", "B"]);
    }

    #[test]
    fn usable_as_trait_object() {
        let repo: Box<dyn Repository<PredictionRecord>> = Box::new(InMemoryRepository::new());
        repo.put(record("X")).unwrap();
        repo.put(record("Y")).unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
        assert_eq!(repo.clear().unwrap(), 2);
        assert!(repo.list().unwrap().is_empty());
    }
}
