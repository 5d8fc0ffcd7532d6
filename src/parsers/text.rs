/// Options controlling how text read from a page is normalized
#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Whether to preserve paragraph structure (insert double newlines between paragraphs)
    pub preserve_paragraphs: bool,
    /// Whether to preserve single newlines within paragraphs
    pub preserve_line_breaks: bool,
}

impl TextOptions {
    /// Single-line values such as titles and author names
    pub fn inline() -> Self {
        Self {
            preserve_paragraphs: false,
            preserve_line_breaks: false,
        }
    }

    /// Article bodies
    pub fn body() -> Self {
        Self {
            preserve_paragraphs: true,
            preserve_line_breaks: true,
        }
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::inline()
    }
}

/// Normalizes text read from a page
///
/// Lines are trimmed, blank-line runs become paragraph breaks and repeated
/// spaces collapse. The result is empty for whitespace-only input.
pub fn normalize(text: &str, options: &TextOptions) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let paragraphs = split_into_paragraphs(text);
    let processed = paragraphs
        .iter()
        .map(|para| process_paragraph(para, options))
        .collect::<Vec<_>>();

    join_paragraphs(&processed, options)
}

/// Normalized text, or `None` when nothing is left
pub fn non_empty(text: &str, options: &TextOptions) -> Option<String> {
    let normalized = normalize(text, options);
    (!normalized.is_empty()).then_some(normalized)
}

/// Splits text into paragraphs based on empty lines
pub fn split_into_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current_paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !current_paragraph.is_empty() {
                paragraphs.push(current_paragraph);
                current_paragraph = Vec::new();
            }
        } else {
            current_paragraph.push(trimmed);
        }
    }

    if !current_paragraph.is_empty() {
        paragraphs.push(current_paragraph);
    }

    paragraphs
}

/// Joins the lines of one paragraph, collapsing inner whitespace
pub fn process_paragraph(paragraph: &[&str], options: &TextOptions) -> String {
    let lines = paragraph.iter().map(|line| collapse_whitespace(line));
    let separator = if options.preserve_line_breaks { "\n" } else { " " };
    lines.collect::<Vec<_>>().join(separator)
}

/// Joins processed paragraphs into a single string
pub fn join_paragraphs(paragraphs: &[String], options: &TextOptions) -> String {
    if options.preserve_paragraphs {
        paragraphs.join("\n\n")
    } else {
        collapse_whitespace(&paragraphs.join(" "))
    }
}

fn collapse_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
