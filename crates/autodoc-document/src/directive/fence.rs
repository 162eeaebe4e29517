//! Code fence tracking.
//!
//! Directive syntax inside fenced code blocks is documentation about the
//! directive, not a request, and must be left alone.

/// Tracks whether line-by-line scanning is inside a fenced code block.
///
/// Fences use three or more backticks or tildes. The closing fence must use
/// the same character, be at least as long as the opening one and carry no
/// info string.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let Some((ch, len)) = fence_marker(trimmed) else {
            return false;
        };

        match self.open {
            Some((open_ch, open_len)) => {
                let closes =
                    ch == open_ch && len >= open_len && trimmed[len..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some((ch, len));
                true
            }
        }
    }
}

/// Fence character and run length at the start of a line, if it is a fence.
fn fence_marker(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|&c| c == first).count();
    (len >= 3).then_some((first, len))
}
