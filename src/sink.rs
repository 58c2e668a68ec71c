//! Series sink: the boundary between the flattening engine and the host
//! application's time-series store.
//!
//! The engine is write-only: it appends `(timestamp, value)` points to
//! path-named series and never reads existing series state. [`MemorySink`]
//! is the bundled in-memory implementation; a host plotting application
//! provides its own by implementing [`SeriesSink`].

use std::collections::HashMap;

/// Append-only destination for flattened samples.
///
/// Series are keyed by path string and created lazily on first append.
/// Implementations must tolerate repeated appends to the same path within
/// one message (sibling leaves can legally share a disambiguated path; both
/// points are kept in encounter order).
#[cfg_attr(test, mockall::automock)]
pub trait SeriesSink {
    /// Append one sample to the series identified by `path`.
    fn append(&mut self, path: &str, timestamp: f64, value: f64);
}

/// A single timestamped sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: f64,
    pub value: f64,
}

/// One append-only series.
#[derive(Debug, Clone, Default)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, in append order.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// The most recently appended point.
    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    fn push(&mut self, point: SeriesPoint) {
        self.points.push(point);
    }
}

/// HashMap-backed series store, mainly for tests, tools and small hosts.
#[derive(Debug, Default)]
pub struct MemorySink {
    series: HashMap<String, Series>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent creation: repeated calls with the same path return the
    /// same series.
    pub fn get_or_create_series(&mut self, path: &str) -> &mut Series {
        self.series.entry(path.to_owned()).or_default()
    }

    /// Look up an existing series without creating it.
    pub fn series(&self, path: &str) -> Option<&Series> {
        self.series.get(path)
    }

    /// Number of distinct series created so far.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Iterate over `(path, series)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(path, series)| (path.as_str(), series))
    }

    /// All series paths, sorted for stable display.
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.series.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Drop all series and their points.
    pub fn clear(&mut self) {
        self.series.clear();
    }
}

impl SeriesSink for MemorySink {
    fn append(&mut self, path: &str, timestamp: f64, value: f64) {
        self.get_or_create_series(path)
            .push(SeriesPoint { timestamp, value });
    }
}
