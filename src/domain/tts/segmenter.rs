use serde::{Deserialize, Serialize};

/// Default upper bound for a single synthesis call, in characters
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 150;

/// One length-bounded chunk of input text, submitted as a single synthesis unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub index: usize,
    pub text: String,
}

impl TextSegment {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Short prefix used in logs and progress lines
    pub fn preview(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}

/// Split text into segments by greedily accumulating whole lines
///
/// Lines are trimmed and blank lines dropped. A line is appended to the
/// current segment only while the joined result (with the `\n` separator)
/// stays within `max_chars`. A line is never split: a single line longer than
/// `max_chars` becomes its own oversized segment.
pub fn segment_text(text: &str, max_chars: usize) -> Vec<TextSegment> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let line_chars = line.chars().count();

        if line_chars > max_chars {
            tracing::warn!(
                line_chars,
                max_chars,
                "Line exceeds the segment limit and will be sent as a single oversized segment"
            );
        }

        if current.is_empty() {
            current.push_str(line);
            current_chars = line_chars;
        } else if current_chars + 1 + line_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current.push_str(line);
            current_chars = line_chars;
        } else {
            current.push('\n');
            current.push_str(line);
            current_chars += 1 + line_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextSegment { index, text })
        .collect()
}
