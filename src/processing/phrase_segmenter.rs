//! Phrase segmentation: splits text into contiguous candidate phrases

use crate::processing::text_processor::is_stop_word;
use unicode_segmentation::UnicodeSegmentation;

/// Produces a lazy sequence of contiguous phrase spans. Every yielded
/// slice borrows from `text`.
pub trait PhraseSegmenter: Send + Sync {
    fn phrases<'t>(&self, text: &'t str) -> Box<dyn Iterator<Item = &'t str> + 't>;
}

/// Stop-word chunker approximating noun chunks.
///
/// A phrase is a run of non-stop word tokens separated by spaces, or glued
/// by `/ - &` between two words (`ci/cd`), or trailed by `+ #` (`c++`).
/// Stop words, other punctuation and line breaks end a phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkSegmenter;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Word,
    Space,
    Infix,
    Suffix,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gap {
    /// Nothing between the last word and here
    Adjacent,
    Space,
    Infix,
}

fn classify(segment: &str) -> Segment {
    if segment.chars().any(char::is_alphanumeric) {
        if is_stop_word(segment) {
            Segment::Break
        } else {
            Segment::Word
        }
    } else if segment.chars().all(char::is_whitespace) {
        if segment.contains(['\n', '\r']) {
            Segment::Break
        } else {
            Segment::Space
        }
    } else {
        match segment {
            "/" | "-" | "&" => Segment::Infix,
            "+" | "#" => Segment::Suffix,
            _ => Segment::Break,
        }
    }
}

impl PhraseSegmenter for ChunkSegmenter {
    fn phrases<'t>(&self, text: &'t str) -> Box<dyn Iterator<Item = &'t str> + 't> {
        let mut segments = text.split_word_bound_indices();
        let mut span: Option<(usize, usize)> = None;
        let mut gap = Gap::Adjacent;

        Box::new(std::iter::from_fn(move || {
            for (idx, segment) in segments.by_ref() {
                let end = idx + segment.len();
                match classify(segment) {
                    Segment::Infix if span.is_some() && gap == Gap::Adjacent => {
                        gap = Gap::Infix;
                        continue;
                    }
                    Segment::Suffix if span.is_some() && gap == Gap::Adjacent => {
                        if let Some((_, span_end)) = span.as_mut() {
                            *span_end = end;
                        }
                        continue;
                    }
                    Segment::Space if gap != Gap::Infix => {
                        gap = Gap::Space;
                        continue;
                    }
                    Segment::Word => {
                        span = Some(match span {
                            Some((start, _)) => (start, end),
                            None => (idx, end),
                        });
                        gap = Gap::Adjacent;
                        continue;
                    }
                    _ => {}
                }

                // Anything else ends the current phrase
                gap = Gap::Adjacent;
                if let Some((start, span_end)) = span.take() {
                    return Some(&text[start..span_end]);
                }
            }
            span.take().map(|(start, span_end)| &text[start..span_end])
        }))
    }
}
