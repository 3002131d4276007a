//! BIP39 vocabulary.
//!
//! A [`Wordlist`] is an ordered, index-addressable list of exactly 2048
//! unique words. It is built once and then only read.

#![forbid(unsafe_code)]

use std::borrow::Cow;
use std::collections::HashMap;

use crate::english::ENGLISH;
use crate::{Error, Result};

/// Number of words in a BIP39 wordlist (2^11).
pub const WORD_COUNT: usize = 2048;

/// Ordered BIP39 vocabulary with a reverse index.
#[derive(Clone, Debug)]
pub struct Wordlist {
    words: Vec<Cow<'static, str>>,
    index: HashMap<Cow<'static, str>, u16>,
}

impl Wordlist {
    /// Build a wordlist from an ordered list of words.
    ///
    /// Fails unless there are exactly 2048 non-empty, unique words.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let words: Vec<Cow<'static, str>> = words.into_iter().map(Into::into).collect();
        if words.len() != WORD_COUNT {
            return Err(Error::InvalidWordlist(format!(
                "expected {WORD_COUNT} words, got {}",
                words.len()
            )));
        }

        let mut index = HashMap::with_capacity(WORD_COUNT);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(Error::InvalidWordlist(format!("bad entry at index {i}")));
            }
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(Error::InvalidWordlist(format!("duplicate word {word:?}")));
            }
        }

        Ok(Self { words, index })
    }

    /// The BIP39 English wordlist.
    pub fn english() -> Self {
        let words: Vec<Cow<'static, str>> = ENGLISH.iter().map(|&w| Cow::Borrowed(w)).collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i as u16))
            .collect();
        Self { words, index }
    }

    /// Word at an 11-bit index.
    ///
    /// Panics if `index >= 2048`.
    pub fn word(&self, index: u16) -> &str {
        &self.words[index as usize]
    }

    /// Index of a word, if present.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Iterate over the words in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_ref())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Wordlist {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_shape() {
        let list = Wordlist::english();
        assert_eq!(list.len(), WORD_COUNT);
        assert_eq!(list.word(0), "abandon");
        assert_eq!(list.word(3), "about");
        assert_eq!(list.word(2047), "zoo");
        assert_eq!(list.index_of("zoo"), Some(2047));
        assert_eq!(list.index_of("notaword"), None);
    }

    #[test]
    fn test_english_sorted_and_unique() {
        let list = Wordlist::english();
        let words: Vec<&str> = list.iter().collect();
        assert!(words.windows(2).all(|w| w[0] < w[1]));
        assert!(words.iter().all(|w| w.len() <= 8 && w.len() >= 3));
    }

    #[test]
    fn test_custom_wordlist() {
        let words: Vec<String> = (0..WORD_COUNT).map(|i| format!("w{i}")).collect();
        let list = Wordlist::new(words).unwrap();
        assert_eq!(list.word(42), "w42");
        assert_eq!(list.index_of("w2047"), Some(2047));
    }

    #[test]
    fn test_wrong_size_rejected() {
        let words = ENGLISH[..2047].iter().copied();
        assert!(matches!(Wordlist::new(words), Err(Error::InvalidWordlist(_))));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut words: Vec<&'static str> = ENGLISH.to_vec();
        words[1] = "abandon";
        assert!(matches!(Wordlist::new(words), Err(Error::InvalidWordlist(_))));
    }
}
