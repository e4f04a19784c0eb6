//! Reading time estimation

use super::{Section, TextBlock};

/// Average reading speed used for estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimate how many whole minutes it takes to read `content`.
///
/// Words are counted across every section before rounding up, so many
/// short sections do not each round up to a full minute.
pub fn estimate_read_minutes(content: &[Section]) -> u32 {
    let words: usize = content
        .iter()
        .map(|section| count_words(&plain_text(&section.body)))
        .sum();

    // Integer ceiling of words / wpm, same as ceil(sum of fractional minutes)
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

/// Plain-text rendering of a list of blocks, formatting dropped
pub fn plain_text(blocks: &[TextBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BlockType;

    fn section(words: usize) -> Section {
        Section {
            heading: "Heading".to_string(),
            body: vec![TextBlock {
                text: vec!["word"; words].join(" "),
                block_type: BlockType::Paragraph,
                spans: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(estimate_read_minutes(&[]), 0);
        assert_eq!(estimate_read_minutes(&[section(0)]), 0);
    }

    #[test]
    fn test_exact_minute() {
        assert_eq!(estimate_read_minutes(&[section(200)]), 1);
        assert_eq!(estimate_read_minutes(&[section(201)]), 2);
    }

    #[test]
    fn test_rounds_after_accumulating() {
        assert_eq!(estimate_read_minutes(&[section(150), section(150)]), 2);
        assert_eq!(
            estimate_read_minutes(&[section(10), section(10), section(10)]),
            1
        );
    }

    #[test]
    fn test_words_split_across_blocks() {
        let body = vec![
            TextBlock {
                text: "ends with".to_string(),
                block_type: BlockType::Paragraph,
                spans: Vec::new(),
            },
            TextBlock {
                text: "starts\nwith  spaces".to_string(),
                block_type: BlockType::ListItem,
                spans: Vec::new(),
            },
        ];
        assert_eq!(plain_text(&body), "ends with starts\nwith  spaces");
        assert_eq!(count_words(&plain_text(&body)), 5);
    }
}
