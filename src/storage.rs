//! High-score persistence. The browser build keeps a single integer in
//! `localStorage`; tests and headless runs use the in-memory store.

use crate::error::{GameError, Result};

pub trait HighScoreStore {
    /// Stored high score, 0 when nothing has been saved yet.
    fn load(&self) -> Result<u32>;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Stored form of a high score.
pub fn encode_score(score: u32) -> String {
    score.to_string()
}

/// Missing or garbled values read as 0.
pub fn decode_score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32> {
        Ok(decode_score(self.raw.as_deref()))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.raw = Some(encode_score(score));
        Ok(())
    }
}

/// `window.localStorage` under a fixed key.
pub struct LocalStore {
    storage: web_sys::Storage,
    key: String,
}

impl LocalStore {
    pub fn open(key: &str) -> Result<Self> {
        let win = web_sys::window().ok_or(GameError::Dom("no window"))?;
        let storage = win
            .local_storage()?
            .ok_or_else(|| GameError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage, key: key.to_string() })
    }
}

impl HighScoreStore for LocalStore {
    fn load(&self) -> Result<u32> {
        let raw = self.storage.get_item(&self.key)?;
        Ok(decode_score(raw.as_deref()))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.storage.set_item(&self.key, &encode_score(score))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_reads_as_zero() {
        assert_eq!(decode_score(None), 0);
        assert_eq!(decode_score(Some("")), 0);
        assert_eq!(decode_score(Some("NaN")), 0);
        assert_eq!(decode_score(Some("-4")), 0);
        assert_eq!(decode_score(Some(" 42 ")), 42);
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), 0);
        assert!(store.raw().is_none());
    }
}
