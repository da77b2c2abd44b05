//! Region layout of a sketch document.
//!
//! A sketch the engine can work with follows this shape:
//!
//! ```text
//! <header: includes, #defines, comments>
//! // Global variables
//! int SEARCH_SPEED = 100;          <- globals region
//! ...
//! // Function prototypes
//! void moveForward(int speed);     <- prototypes region (consecutive prototype lines)
//! ...
//! <body: setup(), loop(), function implementations>
//! ```
//!
//! Both marker lines must appear exactly once, in this order. [`Layout::locate`] reports
//! the byte ranges of the two regions; everything outside them is never touched.

use std::ops::Range;

use crate::error::{Result, SumoError};
use crate::grammar;

/// Comment line that opens the globals region.
pub const GLOBALS_MARKER: &str = "// Global variables";

/// Comment line that closes the globals region and opens the prototypes region.
pub const PROTOTYPES_MARKER: &str = "// Function prototypes";

/// Byte offsets of the regions of one document revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Lines strictly between the two markers.
    pub globals: Range<usize>,
    /// Consecutive prototype lines directly after the prototypes marker. Its end is the
    /// insertion point for new prototypes.
    pub prototypes: Range<usize>,
}

impl Layout {
    /// Locate the globals and prototypes regions of `text`.
    ///
    /// Fails with [`SumoError::RegionMissing`] when a marker is absent, duplicated, or
    /// the markers are out of order.
    pub fn locate(text: &str) -> Result<Self> {
        let mut globals_marker = None;
        let mut prototypes_marker = None;

        for (range, line) in lines(text) {
            let trimmed = line.trim();
            if trimmed == GLOBALS_MARKER {
                if globals_marker.replace(range).is_some() {
                    return Err(SumoError::RegionMissing {
                        marker: GLOBALS_MARKER,
                    });
                }
            } else if trimmed == PROTOTYPES_MARKER && prototypes_marker.replace(range).is_some() {
                return Err(SumoError::RegionMissing {
                    marker: PROTOTYPES_MARKER,
                });
            }
        }

        let globals_marker = globals_marker.ok_or(SumoError::RegionMissing {
            marker: GLOBALS_MARKER,
        })?;
        let prototypes_marker = prototypes_marker.ok_or(SumoError::RegionMissing {
            marker: PROTOTYPES_MARKER,
        })?;
        if prototypes_marker.start < globals_marker.end {
            return Err(SumoError::RegionMissing {
                marker: PROTOTYPES_MARKER,
            });
        }

        let prototypes_start = prototypes_marker.end;
        let prototypes_end = lines(&text[prototypes_start..])
            .take_while(|(_, line)| grammar::is_prototype(line))
            .last()
            .map_or(prototypes_start, |(range, _)| prototypes_start + range.end);

        Ok(Self {
            globals: globals_marker.end..prototypes_marker.start,
            prototypes: prototypes_start..prototypes_end,
        })
    }
}

/// Iterate over the lines of `text` together with their byte ranges.
///
/// Each range includes the line terminator, so concatenating all ranges covers `text`.
pub fn lines<'a>(text: &'a str) -> impl Iterator<Item = (Range<usize>, &'a str)> + 'a {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start..*offset, line))
    })
}
