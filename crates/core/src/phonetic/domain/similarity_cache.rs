/// Memo of similarity scores keyed by an ordered pair of phonetic codes.
///
/// Implementations must be safe to share across scoring threads.
pub trait SimilarityCache: Send + Sync {
    fn get(&self, a: &str, b: &str) -> Option<f64>;

    fn insert(&self, a: &str, b: &str, value: f64);
}

/// Cache that stores nothing; every lookup recomputes.
pub struct NoSimilarityCache;

impl SimilarityCache for NoSimilarityCache {
    fn get(&self, _a: &str, _b: &str) -> Option<f64> {
        None
    }

    fn insert(&self, _a: &str, _b: &str, _value: f64) {}
}
