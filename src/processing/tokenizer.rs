//! Tokenization and normalization

use unicode_segmentation::UnicodeSegmentation;

/// Default minimum token length; shorter runs are treated as noise
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Splits text into lowercase alphabetic tokens.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    min_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_min_len(DEFAULT_MIN_TOKEN_LEN)
    }

    pub fn with_min_len(min_len: usize) -> Self {
        Self {
            min_len: min_len.max(1),
        }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Tokens in source order, with `None` wherever a sub-length word or a digit run was dropped.
    ///
    /// Punctuation and other non-alphanumeric characters only separate runs; they leave no gap.
    pub fn token_stream(&self, text: &str) -> Vec<Option<String>> {
        let mut stream = Vec::new();

        for segment in text.unicode_words() {
            let mut run = String::new();
            let mut in_digits = false;
            for c in segment.chars() {
                if c.is_alphabetic() {
                    in_digits = false;
                    run.push(c);
                    continue;
                }
                self.flush(&mut run, &mut stream);
                if c.is_numeric() {
                    if !in_digits {
                        stream.push(None);
                    }
                    in_digits = true;
                } else {
                    in_digits = false;
                }
            }
            self.flush(&mut run, &mut stream);
        }

        stream
    }

    fn flush(&self, run: &mut String, stream: &mut Vec<Option<String>>) {
        if run.is_empty() {
            return;
        }
        let word = std::mem::take(run).to_lowercase();
        stream.push(self.is_token(&word).then_some(word));
    }

    /// Tokens of at least `min_len` characters
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.token_stream(text).into_iter().flatten().collect()
    }

    pub fn is_token(&self, word: &str) -> bool {
        word.chars().count() >= self.min_len
    }
}

/// Tokenize with the default length floor
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::new().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_alphabetic_tokens() {
        let tokens = tokenize("Rust, Python & Go; 5+ years of AWS-based work!");
        assert_eq!(tokens, vec!["rust", "python", "years", "aws", "based", "work"]);
    }

    #[test]
    fn test_digits_split_tokens() {
        let tokens = tokenize("abc123def h2o");
        assert_eq!(tokens, vec!["abc", "def"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
        assert!(tokenize("12 34 -- !!").is_empty());
    }

    #[test]
    fn test_token_stream_marks_dropped_words() {
        let tokenizer = Tokenizer::new();
        let stream = tokenizer.token_stream("Led a team of 5");
        assert_eq!(
            stream,
            vec![Some("led".to_string()), None, Some("team".to_string()), None, None]
        );
        assert_eq!(tokenizer.tokenize("Led a team of 5"), vec!["led", "team"]);
    }

    #[test]
    fn test_token_stream_digit_runs_leave_one_gap() {
        let stream = Tokenizer::new().token_stream("rust2024edition");
        assert_eq!(
            stream,
            vec![Some("rust".to_string()), None, Some("edition".to_string())]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let tokens = tokenize("Résumé über café");
        assert_eq!(tokens, vec!["résumé", "über", "café"]);
    }

    #[test]
    fn test_custom_min_len() {
        let tokenizer = Tokenizer::with_min_len(5);
        assert_eq!(tokenizer.tokenize("cloud data infrastructure"), vec!["cloud", "infrastructure"]);
    }
}
