use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Lowercased word list, one entry per line of the source file.
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = fs::read(path)?;
        // System word lists are not always valid UTF-8.
        let text = String::from_utf8_lossy(&raw);
        Ok(Self::from_words(text.lines()))
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let words = words
            .into_iter()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Exact match, or a match once a possessive `'s` is dropped.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
            || word
                .strip_suffix("'s")
                .is_some_and(|stem| self.words.contains(stem))
    }
}

/// Strip surrounding punctuation and lowercase. Tokens with digits or
/// without any letter are not words.
pub fn normalize(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(|c: char| !c.is_alphabetic());
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-') {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Percentage of words found in the dictionary, `None` when nothing in the
/// text counts as a word. Hyphenated words are checked part by part.
pub fn accuracy(text: &str, dictionary: &Dictionary) -> Option<f64> {
    let mut total = 0usize;
    let mut known = 0usize;
    for word in text.split_whitespace().filter_map(normalize) {
        for part in word.split('-').filter(|part| !part.is_empty()) {
            total += 1;
            if dictionary.contains(part) {
                known += 1;
            }
        }
    }
    if total == 0 {
        return None;
    }
    Some(known as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["the", "Quick", "brown", "fox", "don't", "well", "known"])
    }

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("\"Quick,\""), Some("quick".to_string()));
        assert_eq!(normalize("don't"), Some("don't".to_string()));
        assert_eq!(normalize("42"), None);
        assert_eq!(normalize("b4"), None);
        assert_eq!(normalize("--"), None);
    }

    #[test]
    fn counts_known_words() {
        let dict = dictionary();
        assert_eq!(accuracy("The quick brown fox", &dict), Some(100.0));
        assert_eq!(accuracy("the quikc brown fxo", &dict), Some(50.0));
    }

    #[test]
    fn possessives_and_hyphens() {
        let dict = dictionary();
        assert_eq!(accuracy("fox's well-known", &dict), Some(100.0));
        assert_eq!(accuracy("don't", &dict), Some(100.0));
    }

    #[test]
    fn nothing_to_check() {
        assert_eq!(accuracy("123 456 !!", &dictionary()), None);
        assert_eq!(accuracy("", &dictionary()), None);
    }

    #[test]
    fn load_reads_one_word_per_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("words");
        fs::write(&path, "Alpha\nbeta\n\ngamma\n").unwrap();
        let dict = Dictionary::load(&path).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("alpha"));
        assert!(Dictionary::load(&dir.path().join("missing")).is_err());
    }
}
