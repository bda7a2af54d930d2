use rand::Rng;
use rand::seq::SliceRandom;

/// Shown when no quote list has loaded (or the loaded list was empty).
pub const FALLBACK_QUOTE: &str = "You're doing great!";

pub const START_LINES: &[&str] = &[
    "Ready to run?",
    "Snacks ahead. Hazards too.",
    "One more run!",
    "Jump early, jump often.",
    "The chard awaits.",
    "Beat your best today!",
];

/// Motivational lines flashed after each pickup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteBook {
    lines: Vec<String>,
}

impl QuoteBook {
    pub fn new(lines: Vec<String>) -> Self {
        let lines = lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self { lines }
    }

    /// Parse the quote feed: a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let lines: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(lines))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.lines.choose(rng).map(String::as_str).unwrap_or(FALLBACK_QUOTE)
    }
}

pub fn random_start_line<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    START_LINES.choose(rng).copied().unwrap_or(START_LINES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_book_falls_back() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(QuoteBook::default().pick(&mut rng), FALLBACK_QUOTE);
    }

    #[test]
    fn feed_parsing_drops_blank_lines() {
        let book = QuoteBook::from_json(r#"["Keep going", "  ", "Nice!"]"#).unwrap();
        assert_eq!(book.len(), 2);
        let mut rng = StdRng::seed_from_u64(7);
        let q = book.pick(&mut rng);
        assert!(q == "Keep going" || q == "Nice!");
    }

    #[test]
    fn feed_must_be_string_array() {
        assert!(QuoteBook::from_json(r#"{"quotes": []}"#).is_err());
    }
}
