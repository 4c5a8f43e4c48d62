/// Length in Unicode scalar values, not bytes.
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Converts a byte offset into `text` to a character offset.
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(text_length("₹75,000"), 7);
        assert_eq!(word_count("  monthly salary\tof ₹75,000 \n"), 4);
        assert_eq!(char_offset("₹ Mumbai", 4), 2);
    }
}
