/// Live word count driven by word boundary transitions.
///
/// A word is counted when typing enters it, so a run of printable
/// characters counts once no matter how long it is, and runs of whitespace
/// never count at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WordCounter {
    in_word: bool,
    count: u64,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a word. Counts only on the `false -> true` transition.
    pub fn start_word(&mut self) {
        if !self.in_word {
            self.in_word = true;
            self.count += 1;
        }
    }

    /// Leave the current word, if any. Never changes the count.
    pub fn end_word(&mut self) {
        self.in_word = false;
    }

    pub fn in_word(&self) -> bool {
        self.in_word
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_of(text: &str) -> u64 {
        let mut counter = WordCounter::new();
        for ch in text.chars() {
            if ch.is_whitespace() {
                counter.end_word();
            } else {
                counter.start_word();
            }
        }
        counter.count()
    }

    #[test]
    fn starts_outside_a_word() {
        let counter = WordCounter::new();
        assert!(!counter.in_word());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn repeated_start_does_not_double_count() {
        let mut counter = WordCounter::new();
        counter.start_word();
        counter.start_word();
        assert_eq!(counter.count(), 1);
        assert!(counter.in_word());
    }

    #[test]
    fn repeated_end_is_a_no_op() {
        let mut counter = WordCounter::new();
        counter.start_word();
        counter.end_word();
        counter.end_word();
        assert_eq!(counter.count(), 1);
        assert!(!counter.in_word());
    }

    #[test]
    fn counts_maximal_runs() {
        assert_eq!(count_of("hello  world"), 2);
        assert_eq!(count_of("  a b  "), 2);
        assert_eq!(count_of("one\n\ntwo \n three"), 3);
        assert_eq!(count_of("   "), 0);
    }
}
