//! Hash collections used across Kite.
//!
//! Re-exports of the AHash-backed maps and sets so every crate hashes the same way.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("panel1", 3);
        assert_eq!(map.get("panel1"), Some(&3));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert("button1");
        assert!(set.contains("button1"));
        assert!(!set.contains("button2"));
    }
}
