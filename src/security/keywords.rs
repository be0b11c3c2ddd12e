//! Evasion-tolerant keyword patterns.
//!
//! Attackers hide keywords from literal matchers by splicing an inline comment
//! into them (`dr/**/op`, `sel/*x*/ect`). A keyword of N characters is
//! accepted in its literal form or split at any of its N-1 inner positions
//! with a block comment inserted there.

use crate::constants::INLINE_COMMENT_PATTERN;

/// Every spelling a keyword is accepted under, as regex fragments.
///
/// The literal form comes first, followed by one variant per split point.
/// Keywords are lowercased; values must be lowercased before matching.
pub fn keyword_variants(keyword: &str) -> Vec<String> {
    let keyword = keyword.to_lowercase();
    let mut variants = vec![regex::escape(&keyword)];

    for (split, _) in keyword.char_indices().skip(1) {
        let (head, tail) = keyword.split_at(split);
        variants.push(format!(
            "{}{}{}",
            regex::escape(head),
            INLINE_COMMENT_PATTERN,
            regex::escape(tail)
        ));
    }

    variants
}

/// Pattern matching any of `keywords` in any evasion-tolerant spelling.
pub fn keyword_cluster(keywords: &[&str]) -> String {
    let alternatives: Vec<String> = keywords
        .iter()
        .flat_map(|keyword| keyword_variants(keyword))
        .collect();

    format!("(?:{})", alternatives.join("|"))
}
