//! Line → word tokenization.

/// Extract the word tokens from one line of input text.
///
/// In order:
///
/// 1. every run of whitespace collapses to a single space;
/// 2. every literal `". "` is removed outright — a quirk carried over from
///    the original counter that joins a sentence-final word to the word
///    after it (`"end. Next"` → `"endNext"`), kept as-is rather than fixed;
/// 3. what remains splits on spaces, and each fragment yields its maximal
///    runs of word characters (ASCII letters, digits, `_`, `.`, `-`).
///
/// Any input is valid; an empty or all-punctuation line yields no tokens.
#[must_use]
pub fn words(line: &str) -> Vec<String> {
    collapse_whitespace(line)
        .replace(". ", "")
        .split(' ')
        .flat_map(word_runs)
        .collect()
}

/// Each whitespace run becomes exactly one space, including runs at either
/// end of the line, so a trailing `". "` is still visible to the removal
/// step.
fn collapse_whitespace(line: &str) -> String {
    let mut collapsed = String::with_capacity(line.len());
    let mut in_run = false;
    for c in line.chars() {
        if c.is_whitespace() {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Maximal word-character runs within one space-free fragment.
fn word_runs(fragment: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in fragment.chars() {
        if is_word_char(c) {
            current.push(c);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
