//! Exact-match route storage.
//!
//! # Design Decisions
//! - One inner map per method, all created up front
//! - Paths are opaque keys: no trailing-slash, case or percent normalization
//! - Last registration for a (method, path) pair wins

use std::collections::HashMap;

use crate::routing::RouteMethod;

/// Method -> path -> handler mapping.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: HashMap<RouteMethod, HashMap<String, H>>,
}

impl<H> RouteTable<H> {
    /// Create a table with an empty slot for every routable method.
    pub fn new() -> Self {
        Self {
            routes: RouteMethod::ALL
                .into_iter()
                .map(|m| (m, HashMap::new()))
                .collect(),
        }
    }

    /// Insert or overwrite the handler for `(method, path)`.
    ///
    /// Returns the handler that was replaced, if any.
    pub fn insert(&mut self, method: RouteMethod, path: impl Into<String>, handler: H) -> Option<H> {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.into(), handler)
    }

    /// Look up the handler registered for exactly `(method, path)`.
    pub fn get(&self, method: RouteMethod, path: &str) -> Option<&H> {
        self.routes.get(&method).and_then(|paths| paths.get(path))
    }

    pub fn contains(&self, method: RouteMethod, path: &str) -> bool {
        self.get(method, path).is_some()
    }

    /// Paths registered under a method, in arbitrary order.
    pub fn paths(&self, method: RouteMethod) -> impl Iterator<Item = &str> {
        self.routes
            .get(&method)
            .into_iter()
            .flat_map(|paths| paths.keys().map(String::as_str))
    }

    /// Total number of (method, path) entries.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_method_slot_exists() {
        let table: RouteTable<u32> = RouteTable::new();
        assert_eq!(table.routes.len(), 7);
        assert!(table.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut table = RouteTable::new();
        assert_eq!(table.insert(RouteMethod::Get, "/a", 1), None);
        assert_eq!(table.insert(RouteMethod::Get, "/a", 2), Some(1));
        assert_eq!(table.get(RouteMethod::Get, "/a"), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_paths_are_exact() {
        let mut table = RouteTable::new();
        table.insert(RouteMethod::Get, "/Users", 1);

        assert!(table.contains(RouteMethod::Get, "/Users"));
        assert!(!table.contains(RouteMethod::Get, "/users"));
        assert!(!table.contains(RouteMethod::Get, "/Users/"));
        assert!(!table.contains(RouteMethod::Get, "/%55sers"));
        assert!(!table.contains(RouteMethod::Head, "/Users"));
    }

    #[test]
    fn test_paths_listing() {
        let mut table = RouteTable::new();
        table.insert(RouteMethod::Post, "/a", 1);
        table.insert(RouteMethod::Post, "/b", 2);

        let mut paths: Vec<_> = table.paths(RouteMethod::Post).collect();
        paths.sort();
        assert_eq!(paths, vec!["/a", "/b"]);
        assert_eq!(table.paths(RouteMethod::Get).count(), 0);
    }
}
