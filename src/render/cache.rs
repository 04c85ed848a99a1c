use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use ordered_float::OrderedFloat;
use tracing::trace;

use crate::render::color::{Color, css_rgba};

/// Hit/miss counters for one memoized formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

#[derive(Debug)]
struct StringCache<K> {
    entries: HashMap<K, String>,
    max_entries: Option<usize>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash> StringCache<K> {
    fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> String) -> String {
        if let Some(value) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return value.clone();
        }
        self.misses = self.misses.saturating_add(1);
        if self
            .max_entries
            .is_some_and(|max_entries| self.entries.len() >= max_entries)
        {
            self.entries.clear();
        }
        let value = compute();
        self.entries.insert(key, value.clone());
        value
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

/// Identifies one scaled font face: family name, DPI and point size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FaceKey {
    pub(crate) family: String,
    pub(crate) dpi: OrderedFloat<f64>,
    pub(crate) size: OrderedFloat<f64>,
}

/// Pixel advances and kerning for one scaled face.
#[derive(Debug, Default)]
pub(crate) struct FaceMetrics {
    pub(crate) advances: HashMap<char, f64>,
    pub(crate) kerning: HashMap<(char, char), f64>,
}

/// Memoized formatting and font-metric lookups shared by renderers.
///
/// Each map sits behind its own lock around read-and-maybe-insert. Entries
/// are never invalidated; a bounded cache clears a map only when an insert
/// would exceed its capacity.
#[derive(Debug)]
pub struct RenderCache {
    itoa: Mutex<StringCache<i64>>,
    ftoa1: Mutex<StringCache<OrderedFloat<f64>>>,
    ftoa2: Mutex<StringCache<OrderedFloat<f64>>>,
    colors: Mutex<StringCache<Color>>,
    time_labels: Mutex<StringCache<(&'static str, i64)>>,
    faces: Mutex<HashMap<FaceKey, FaceMetrics>>,
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::with_capacity(None)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RenderCache {
    fn with_capacity(max_entries: Option<usize>) -> Self {
        Self {
            itoa: Mutex::new(StringCache::new(max_entries)),
            ftoa1: Mutex::new(StringCache::new(max_entries)),
            ftoa2: Mutex::new(StringCache::new(max_entries)),
            colors: Mutex::new(StringCache::new(max_entries)),
            time_labels: Mutex::new(StringCache::new(max_entries)),
            faces: Mutex::new(HashMap::new()),
        }
    }

    /// Unbounded cache, private to whoever owns it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache whose string maps clear once they reach `max_entries`.
    #[must_use]
    pub fn bounded(max_entries: usize) -> Self {
        Self::with_capacity(Some(max_entries.max(1)))
    }

    /// Process-wide cache used by default renderers and formatters.
    #[must_use]
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<RenderCache>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    pub fn itoa(&self, value: i64) -> String {
        lock(&self.itoa).get_or_insert_with(value, || value.to_string())
    }

    /// One-decimal float text, e.g. `12.8`.
    pub fn ftoa1(&self, value: f64) -> String {
        lock(&self.ftoa1).get_or_insert_with(OrderedFloat(value), || format!("{value:.1}"))
    }

    /// Two-decimal float text, e.g. `1234.00`.
    pub fn ftoa2(&self, value: f64) -> String {
        lock(&self.ftoa2).get_or_insert_with(OrderedFloat(value), || format!("{value:.2}"))
    }

    /// CSS `rgba(...)` text for `color`.
    pub fn color_string(&self, color: Color) -> String {
        lock(&self.colors).get_or_insert_with(color, || {
            trace!(?color, "color string cache miss");
            css_rgba(color)
        })
    }

    /// Time label keyed by format and Unix second.
    pub fn time_label(
        &self,
        format: &'static str,
        unix_seconds: i64,
        compute: impl FnOnce() -> String,
    ) -> String {
        lock(&self.time_labels).get_or_insert_with((format, unix_seconds), compute)
    }

    pub(crate) fn with_face_metrics<T>(
        &self,
        key: FaceKey,
        f: impl FnOnce(&mut FaceMetrics) -> T,
    ) -> T {
        let mut faces = lock(&self.faces);
        f(faces.entry(key).or_default())
    }

    #[must_use]
    pub fn itoa_stats(&self) -> CacheStats {
        lock(&self.itoa).stats()
    }

    #[must_use]
    pub fn float_stats(&self) -> CacheStats {
        let one = lock(&self.ftoa1).stats();
        let two = lock(&self.ftoa2).stats();
        CacheStats {
            hits: one.hits + two.hits,
            misses: one.misses + two.misses,
            size: one.size + two.size,
        }
    }

    #[must_use]
    pub fn color_stats(&self) -> CacheStats {
        lock(&self.colors).stats()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        lock(&self.faces).len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::RenderCache;
    use crate::render::Color;

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let cache = RenderCache::new();
        assert_eq!(cache.itoa(-42), "-42");
        assert_eq!(cache.itoa(-42), "-42");
        let stats = cache.itoa_stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
        assert_eq!(cache.ftoa1(12.777), "12.8");
        assert_eq!(cache.ftoa2(1234.0), "1234.00");
    }

    #[test]
    fn bounded_cache_clears_at_capacity() {
        let cache = RenderCache::bounded(2);
        cache.itoa(1);
        cache.itoa(2);
        cache.itoa(3);
        assert_eq!(cache.itoa_stats().size, 1);
    }

    #[test]
    fn concurrent_color_lookups_agree() {
        let cache = Arc::new(RenderCache::new());
        let color = Color::new(10, 20, 30, 128);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.color_string(color))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), "rgba(10,20,30,0.5)");
        }
        assert_eq!(cache.color_stats().size, 1);
    }
}
