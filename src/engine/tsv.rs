//! Parser for Tesseract's TSV word dump.
//!
//! Columns: `level page_num block_num par_num line_num word_num left top
//! width height conf text`. Only word-level rows (level 5) with non-blank
//! text become [`Word`]s.

use crate::content::types::Word;

const WORD_LEVEL: u32 = 5;
const COLUMNS: usize = 12;

/// Parse TSV output into word observations, skipping the header, non-word
/// rows, blank words and malformed rows.
pub fn parse_words(tsv: &str) -> Vec<Word> {
    tsv.lines().filter_map(parse_row).collect()
}

fn parse_row(row: &str) -> Option<Word> {
    let fields: Vec<&str> = row.splitn(COLUMNS, '\t').collect();
    if fields.len() < COLUMNS {
        return None;
    }
    if fields[0].trim().parse::<u32>().ok()? != WORD_LEVEL {
        return None;
    }

    let text = fields[11].trim();
    if text.is_empty() {
        return None;
    }

    Some(Word {
        text: text.to_string(),
        left: fields[6].trim().parse().ok()?,
        top: fields[7].trim().parse().ok()?,
        block: fields[2].trim().parse().ok()?,
        par: fields[3].trim().parse().ok()?,
        line: fields[4].trim().parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t
2\t1\t1\t0\t0\t0\t10\t12\t300\t40\t-1\t
5\t1\t1\t1\t1\t1\t10\t12\t60\t20\t96.1\tName
5\t1\t1\t1\t1\t2\t210\t12\t40\t20\t95.0\tAge
5\t1\t1\t1\t1\t3\t300\t12\t5\t20\t10.0\t \n5\t1\t1\t1\t2\t1\t11\t40\t60\t20\t91.3\tAlice
";

    #[test]
    fn parses_word_rows_only() {
        let words = parse_words(SAMPLE);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["Name", "Age", "Alice"]);
    }

    #[test]
    fn keeps_position_and_structure() {
        let words = parse_words(SAMPLE);
        assert_eq!(
            words[2],
            Word {
                text: "Alice".into(),
                left: 11,
                top: 40,
                block: 1,
                par: 1,
                line: 2,
            }
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse_words("").is_empty());
    }

    #[test]
    fn skips_truncated_rows() {
        assert!(parse_words("5\t1\t1\t1\t1\t1\t10").is_empty());
    }

    #[test]
    fn text_may_contain_tabs_in_last_column() {
        let words = parse_words("5\t1\t1\t1\t1\t1\t10\t12\t60\t20\t90\ta\tb");
        assert_eq!(words[0].text, "a\tb");
    }
}
