//! Memoized pill backgrounds.
//!
//! Every reaction button is drawn on a stretchable capsule. Building the
//! capsule description is cheap, but the renderer behind it typically
//! rasterizes one image per distinct description, so the node keeps a small
//! LRU of them keyed by everything that affects the pixels: fill, optional
//! stroke, and diameter.
//!
//! # Invalidation
//!
//! Call [`PillBackgroundCache::invalidate_all()`] on theme change. Like the
//! layout cache this bumps a generation counter; stale entries are replaced
//! lazily on next access.

use std::hash::{Hash, Hasher};

use ahash::AHashMap;
use reactbar_core::geometry::Sides;
use tracing::debug;

use crate::color::Color;

/// An optional outline around the capsule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillStroke {
    pub color: Color,
    pub width: f64,
}

/// Key for pill background lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PillKey {
    fill: Color,
    stroke: Option<(Color, u64)>,
    diameter_bits: u64,
}

impl PillKey {
    pub fn new(fill: Color, stroke: Option<PillStroke>, diameter: f64) -> Self {
        Self {
            fill,
            stroke: stroke.map(|s| (s.color, s.width.to_bits())),
            diameter_bits: diameter.to_bits(),
        }
    }

    /// Fingerprint of the key, stable within a process.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = ahash::AHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// A stretchable capsule description.
///
/// The caps are `diameter / 2` wide and never stretch; only the middle
/// column is repeated to reach the button width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillBackground {
    pub fill: Color,
    pub stroke: Option<PillStroke>,
    pub diameter: f64,
    pub corner_radius: f64,
    pub cap_insets: Sides,
}

impl PillBackground {
    /// Describe a capsule of the given diameter.
    pub fn new(fill: Color, stroke: Option<PillStroke>, diameter: f64) -> Self {
        let radius = diameter / 2.0;
        Self {
            fill,
            stroke,
            diameter,
            corner_radius: radius,
            cap_insets: Sides::new(radius, radius, radius, radius),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedPill {
    pill: PillBackground,
    generation: u64,
    access_count: u32,
}

/// Statistics about pill cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PillCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Small LRU of pill backgrounds owned by one reaction bar.
#[derive(Debug)]
pub struct PillBackgroundCache {
    entries: AHashMap<PillKey, CachedPill>,
    generation: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl PillBackgroundCache {
    /// Create a cache holding at most `max_entries` backgrounds.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: AHashMap::with_capacity(max_entries),
            generation: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Get the background for `key`, building it on a miss.
    pub fn get_or_insert(
        &mut self,
        fill: Color,
        stroke: Option<PillStroke>,
        diameter: f64,
    ) -> PillBackground {
        let key = PillKey::new(fill, stroke, diameter);
        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
        {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            return entry.pill;
        }

        self.misses += 1;
        let pill = PillBackground::new(fill, stroke, diameter);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_lru();
        }
        self.entries.insert(
            key,
            CachedPill {
                pill,
                generation: self.generation,
                access_count: 1,
            },
        );
        pill
    }

    /// Mark every entry stale. O(1).
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, "pill background cache invalidated");
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn stats(&self) -> PillCacheStats {
        PillCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_lru(&mut self) {
        let generation = self.generation;
        // Stale entries go first, then the least accessed one.
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| (e.generation == generation, e.access_count))
            .map(|(k, _)| *k)
        {
            self.entries.remove(&key);
        }
    }
}

impl Default for PillBackgroundCache {
    fn default() -> Self {
        Self::new(8)
    }
}
