use super::phonetic_code::PhoneticCode;

/// Domain interface for word-level phonetic encoding.
///
/// Implementations are stateless and shared across scoring threads.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, word: &str) -> PhoneticCode;

    /// Short identifier used in reports and on the command line.
    fn name(&self) -> &'static str;
}
