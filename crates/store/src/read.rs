//! Read path: `get()`.

use log::debug;

use crate::Store;

impl Store {
    /// Looks up `key`, consulting tier 1, then tier 2, then segments.
    ///
    /// Tier 1 is searched via a linear scan of its in-order traversal rather
    /// than a direct tree lookup — a deliberate, faithful-port quirk (§4.6)
    /// that also produces the freshness caveat documented on [`Store`]: a
    /// key's tier-1 value is always found first, even if a later write to
    /// the same key reached tier 2 or a segment.
    ///
    /// Never errors: an absent key and an unreadable segment both resolve to
    /// `None` (§7's `KeyNotFound` and `SegmentUnreadable` policies).
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        if let Some((_, v)) = self.tier1.in_order().into_iter().find(|(k, _)| *k == key) {
            debug!("key found in tier 1 (AVL tree)");
            return Some(v.to_vec());
        }
        if let Some(v) = self.tier2.get(key) {
            debug!("key found in tier 2 (staging buffer)");
            return Some(v.to_vec());
        }
        let result = self.segments.lookup(key);
        debug!("key {} in segments", if result.is_some() { "found" } else { "not found" });
        result
    }
}
