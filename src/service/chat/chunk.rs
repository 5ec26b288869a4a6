//! Splitting long texts into message-sized slices.

/// Splits `text` into consecutive slices of at most `max_length` UTF-16 code units.
///
/// Boundaries ignore words and lines. A surrogate pair is never cut in half: when it
/// would straddle a boundary the slice ends before it. A character wider than
/// `max_length` gets a slice of its own.
pub fn split_utf16(text: &str, max_length: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut units = 0;

    for (index, ch) in text.char_indices() {
        let width = ch.len_utf16();

        if units + width > max_length && index > start {
            chunks.push(&text[start..index]);
            start = index;
            units = 0;
        }

        units += width;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16_len(s: &str) -> usize {
        s.encode_utf16().count()
    }

    #[test]
    fn empty_text_has_no_slices() {
        assert!(split_utf16("", 4096).is_empty());
    }

    #[test]
    fn slices_are_fixed_size_and_ordered() {
        assert_eq!(split_utf16("abcdefghij", 3), vec!["abc", "def", "ghi", "j"]);
        assert_eq!(split_utf16("abcdef", 3), vec!["abc", "def"]);
        assert_eq!(split_utf16("ab", 4096), vec!["ab"]);
    }

    #[test]
    fn boundaries_may_cut_words() {
        assert_eq!(split_utf16("hello world", 4), vec!["hell", "o wo", "rld"]);
    }

    #[test]
    fn slices_reconstruct_the_text() {
        let text = "Привет, мир! ".repeat(700);

        for max_length in [1, 2, 7, 100, 4096] {
            let chunks = split_utf16(&text, max_length);

            assert_eq!(chunks.concat(), text);
            assert_eq!(chunks.len(), utf16_len(&text).div_ceil(max_length));
            assert!(chunks.iter().all(|c| utf16_len(c) <= max_length));
        }
    }

    #[test]
    fn surrogate_pairs_stay_whole() {
        assert_eq!(split_utf16("a😀b", 3), vec!["a😀", "b"]);
        assert_eq!(split_utf16("ab😀", 3), vec!["ab", "😀"]);
        assert_eq!(split_utf16("😀😀", 1), vec!["😀", "😀"]);
    }
}
