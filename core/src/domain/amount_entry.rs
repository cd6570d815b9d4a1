//! Quick-record amount keypad.
//!
//! Keys are `0`-`9` and `.`. The display string is what the user sees; the
//! parsed [`AmountEntry::amount`] feeds [`super::TransactionDraft::amount`].

pub const INITIAL_AMOUNT: &str = "45.00";
pub const MAX_FRACTION_DIGITS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountEntry {
    text: String,
}

impl Default for AmountEntry {
    fn default() -> Self {
        Self {
            text: INITIAL_AMOUNT.to_string(),
        }
    }
}

impl AmountEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one keypad key. Returns false when the key was ignored.
    pub fn press(&mut self, key: char) -> bool {
        if key == '.' {
            if self.text.contains('.') {
                return false;
            }
        } else if !key.is_ascii_digit() {
            return false;
        } else if self.text == "0" {
            self.text = key.to_string();
            return true;
        }

        let fraction_len = self
            .text
            .split_once('.')
            .map(|(_, fraction)| fraction.len())
            .unwrap_or(0);
        if fraction_len >= MAX_FRACTION_DIGITS {
            return false;
        }

        self.text.push(key);
        true
    }

    /// Remove the last key. An emptied entry reads "0".
    pub fn backspace(&mut self) {
        self.text.pop();
        if self.text.is_empty() {
            self.text.push('0');
        }
    }

    pub fn clear(&mut self) {
        self.text = "0".to_string();
    }

    pub fn display(&self) -> &str {
        &self.text
    }

    pub fn amount(&self) -> f64 {
        self.text.trim_end_matches('.').parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> AmountEntry {
        let mut entry = AmountEntry::new();
        entry.clear();
        for key in keys.chars() {
            entry.press(key);
        }
        entry
    }

    #[test]
    fn test_starts_at_default_amount() {
        let entry = AmountEntry::new();
        assert_eq!(entry.display(), "45.00");
        assert_eq!(entry.amount(), 45.0);
    }

    #[test]
    fn test_default_amount_is_full() {
        let mut entry = AmountEntry::new();
        assert!(!entry.press('7'));
        assert!(!entry.press('.'));
        assert_eq!(entry.display(), "45.00");
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let entry = typed("7");
        assert_eq!(entry.display(), "7");

        let entry = typed("0012");
        assert_eq!(entry.display(), "12");
    }

    #[test]
    fn test_zero_then_point_keeps_zero() {
        let entry = typed("0.5");
        assert_eq!(entry.display(), "0.5");
        assert_eq!(entry.amount(), 0.5);
    }

    #[test]
    fn test_single_decimal_point() {
        let mut entry = typed("12.");
        assert!(!entry.press('.'));
        assert_eq!(entry.display(), "12.");
        assert_eq!(entry.amount(), 12.0);
    }

    #[test]
    fn test_at_most_two_fraction_digits() {
        let mut entry = typed("3.14");
        assert!(!entry.press('1'));
        assert_eq!(entry.display(), "3.14");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut entry = typed("8");
        assert!(!entry.press('-'));
        assert!(!entry.press('e'));
        assert_eq!(entry.display(), "8");
    }

    #[test]
    fn test_backspace_down_to_zero() {
        let mut entry = typed("25");
        entry.backspace();
        assert_eq!(entry.display(), "2");
        entry.backspace();
        assert_eq!(entry.display(), "0");
        entry.backspace();
        assert_eq!(entry.display(), "0");
        assert_eq!(entry.amount(), 0.0);
    }
}
