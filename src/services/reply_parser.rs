//! Extraction of candidate source from free-text oracle replies.
//!
//! Replies usually wrap code in triple-backtick fences, but not always, so
//! the fallback to the whole reply is part of the contract, not a nicety.

/// All fenced code regions in the reply, in order of appearance.
///
/// A fence is a line starting (after indentation) with three backticks; an
/// optional language tag on the opening fence is discarded. An unterminated
/// fence yields everything collected up to the end of the reply.
pub fn fenced_blocks(reply: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in reply.lines() {
        if line.trim_start().starts_with("```") {
            match current.take() {
                Some(collected) => blocks.push(collected.join("\n")),
                None => current = Some(Vec::new()),
            }
        } else if let Some(collected) = &mut current {
            collected.push(line);
        }
    }
    if let Some(collected) = current {
        blocks.push(collected.join("\n"));
    }

    blocks
}

/// The candidate source for one reply: the first fenced block, or the whole
/// reply verbatim when nothing is fenced. Later blocks are ignored, never
/// merged.
pub fn candidate_source(reply: &str) -> String {
    fenced_blocks(reply)
        .into_iter()
        .next()
        .unwrap_or_else(|| reply.to_string())
}
