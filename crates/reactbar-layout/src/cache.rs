//! Layout cache for memoizing flow arrangements.
//!
//! A chat list lays out the same message many times: once while measuring,
//! again when the list settles, and again on every scroll-triggered reuse of
//! the cell. [`ReactionLayoutCache`] keeps the arranged frames keyed by
//! everything that affects them so identical requests skip the packer.
//!
//! # Usage
//!
//! ```
//! use reactbar_layout::{DisplayAlignment, Flow, ReactionLayoutCache, Size};
//!
//! let mut cache = ReactionLayoutCache::new(32);
//! let flow = Flow::default();
//! let sizes = [Size::new(58.0, 30.0), Size::new(64.0, 30.0)];
//!
//! let first = cache.arrange(&flow, &sizes, 200.0, 0.0, DisplayAlignment::Left);
//! let second = cache.arrange(&flow, &sizes, 200.0, 0.0, DisplayAlignment::Left);
//! assert_eq!(first, second);
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! # Invalidation
//!
//! The sizes, width and alignment are part of the key, so resizes and data
//! changes need no invalidation. Call [`ReactionLayoutCache::invalidate_all()`]
//! when something outside the key changes, such as the font used by the
//! text measurer.
//!
//! # Cache Eviction
//!
//! The cache uses LRU (least recently used) eviction when at capacity.
//! Entries from an older generation are evicted before any live entry.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::{DisplayAlignment, Flow, FlowArrangement, FlowSpacing, Size};

/// Key for flow cache lookups.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FlowCacheKey {
    /// Hash fingerprint of the button sizes, in order.
    pub sizes_hash: u64,
    /// Number of buttons, kept separately to make collisions less likely.
    pub count: usize,
    pub bounding_width_bits: u64,
    pub top_bits: u64,
    pub alignment: DisplayAlignment,
    /// Hash fingerprint of the spacing.
    pub spacing_hash: u64,
}

impl FlowCacheKey {
    pub fn new(
        sizes: &[Size],
        bounding_width: f64,
        top: f64,
        alignment: DisplayAlignment,
        spacing: FlowSpacing,
    ) -> Self {
        Self {
            sizes_hash: Self::hash_sizes(sizes),
            count: sizes.len(),
            bounding_width_bits: bounding_width.to_bits(),
            top_bits: top.to_bits(),
            alignment,
            spacing_hash: Self::hash_spacing(spacing),
        }
    }

    fn hash_sizes(sizes: &[Size]) -> u64 {
        let mut hasher = FxHasher::default();
        for size in sizes {
            size.width.to_bits().hash(&mut hasher);
            size.height.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    fn hash_spacing(spacing: FlowSpacing) -> u64 {
        let mut hasher = FxHasher::default();
        spacing.item_gap.to_bits().hash(&mut hasher);
        spacing.row_gap.to_bits().hash(&mut hasher);
        spacing.edge_outset.to_bits().hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug)]
struct CachedFlowEntry {
    arrangement: FlowArrangement,
    generation: u64,
    last_used: u64,
}

/// Statistics about layout cache performance.
#[derive(Debug, Clone, Default)]
pub struct FlowCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Cache for flow arrangements.
///
/// # Generation-Based Invalidation
///
/// Each entry is tagged with a generation number. Calling
/// [`invalidate_all()`](ReactionLayoutCache::invalidate_all) bumps the
/// generation, making all existing entries stale.
#[derive(Debug)]
pub struct ReactionLayoutCache {
    entries: FxHashMap<FlowCacheKey, CachedFlowEntry>,
    generation: u64,
    /// Monotonic access clock for recency.
    clock: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl ReactionLayoutCache {
    /// Create a new cache with the specified maximum capacity.
    #[inline]
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: FxHashMap::with_capacity_and_hasher(max_entries, Default::default()),
            generation: 0,
            clock: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Arrange through the cache.
    pub fn arrange(
        &mut self,
        flow: &Flow,
        sizes: &[Size],
        bounding_width: f64,
        top: f64,
        alignment: DisplayAlignment,
    ) -> FlowArrangement {
        let key = FlowCacheKey::new(sizes, bounding_width, top, alignment, flow.spacing());
        let arrangement =
            self.get_or_compute(key, || flow.arrange(sizes, bounding_width, top, alignment));
        if arrangement.frames.len() == sizes.len() {
            return arrangement;
        }

        // A fingerprint collision returned frames for other buttons.
        #[cfg(feature = "tracing")]
        debug!(
            cached = arrangement.frames.len(),
            expected = sizes.len(),
            "flow cache entry does not match input; recomputing"
        );
        self.hits = self.hits.saturating_sub(1);
        self.misses += 1;
        let arrangement = flow.arrange(sizes, bounding_width, top, alignment);
        self.store(key, arrangement.clone());
        arrangement
    }

    /// Get a cached arrangement or compute and cache a new one.
    pub fn get_or_compute<F>(&mut self, key: FlowCacheKey, compute: F) -> FlowArrangement
    where
        F: FnOnce() -> FlowArrangement,
    {
        self.clock += 1;
        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
        {
            self.hits += 1;
            entry.last_used = self.clock;
            #[cfg(feature = "tracing")]
            trace!(count = key.count, "flow cache hit");
            return entry.arrangement.clone();
        }

        self.misses += 1;
        let arrangement = compute();
        self.store(key, arrangement.clone());
        arrangement
    }

    fn store(&mut self, key: FlowCacheKey, arrangement: FlowArrangement) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_lru();
        }
        self.entries.insert(
            key,
            CachedFlowEntry {
                arrangement,
                generation: self.generation,
                last_used: self.clock,
            },
        );
    }

    /// Invalidate all entries by bumping the generation. O(1).
    #[inline]
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        #[cfg(feature = "tracing")]
        debug!(generation = self.generation, "flow cache invalidated");
    }

    pub fn stats(&self) -> FlowCacheStats {
        let total = self.hits + self.misses;
        FlowCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    #[inline]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Clear all entries. Unlike `invalidate_all`, this frees memory.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| (e.generation == self.generation, e.last_used))
            .map(|(k, _)| *k)
        {
            self.entries.remove(&key);
        }
    }
}

impl Default for ReactionLayoutCache {
    /// Creates a cache with default capacity of 64 entries.
    fn default() -> Self {
        Self::new(64)
    }
}
