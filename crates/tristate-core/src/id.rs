#![forbid(unsafe_code)]

//! Process-wide unique identifiers for control instances.
//!
//! Every control gets an id of the form `prefix + n`, where `n` comes from a
//! single monotonically increasing counter shared by the whole process. The
//! first id issued uses `n == 1`.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_UNIQUE_ID: AtomicU64 = AtomicU64::new(0);

/// Mint a fresh identifier with the given prefix.
///
/// Ids from the same process never repeat, even across prefixes.
///
/// ```
/// use tristate_core::id::next_unique_id;
///
/// let a = next_unique_id("cb-");
/// let b = next_unique_id("cb-");
/// assert_ne!(a, b);
/// assert!(a.starts_with("cb-"));
/// ```
#[must_use]
pub fn next_unique_id(prefix: &str) -> String {
    let n = NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{prefix}{n}")
}

/// Number of identifiers issued so far in this process.
#[must_use]
pub fn issued() -> u64 {
    NEXT_UNIQUE_ID.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_distinct_and_prefixed() {
        let ids: Vec<String> = (0..64).map(|_| next_unique_id("x-")).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| id.starts_with("x-")));
    }

    #[test]
    fn counter_is_monotonic() {
        let before = issued();
        let _ = next_unique_id("m-");
        assert!(issued() > before);
    }

    #[test]
    fn ids_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..100).map(|_| next_unique_id("t-")).collect::<Vec<_>>()))
            .collect();
        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id), "duplicate id issued across threads");
            }
        }
        assert_eq!(all.len(), 400);
    }
}
