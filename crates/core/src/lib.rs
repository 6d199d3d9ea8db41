//! Phonetic correction and scoring of speech-recognition transcripts against
//! an expected phrase.

pub mod context;
pub mod matching;
pub mod phonetic;
pub mod recognition;
pub mod scoring;
pub mod shared;
