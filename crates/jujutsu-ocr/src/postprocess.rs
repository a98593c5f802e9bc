use unicode_normalization::UnicodeNormalization;

/// Page separator Tesseract appends after every page.
const PAGE_SEPARATOR: char = '\u{c}';

/// Strip the page separator and trailing whitespace from raw engine output.
pub fn clean_output(raw: &str) -> String {
    raw.trim_end_matches(|c: char| c == PAGE_SEPARATOR || c.is_whitespace())
        .to_string()
}

/// NFKC-normalize and drop the spaces the engine puts between CJK characters.
///
/// Line breaks and spaces next to non-CJK text are kept.
pub fn normalize_cjk(text: &str) -> String {
    let text: String = text.nfkc().collect();
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = out.chars().next_back();
            let next = chars[i + 1..].iter().copied().find(|n| *n != ' ');
            if let (Some(prev), Some(next)) = (prev, next)
                && is_cjk(prev)
                && is_cjk(next)
            {
                continue;
            }
        }
        out.push(c);
    }

    out
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}' // punctuation
        | '\u{3040}'..='\u{30FF}' // kana
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FFEF}'
    )
}
