//! Segment builder: compiles a [`Song`] into [`TuneSegment`]s.
//!
//! A svara sounds at a point in time, while its gamaka shapes the pitch on the
//! way to the next svara. Each segment therefore pairs two consecutive svaras
//! with the gamaka of the first. A final segment sustains the last svara.

use crate::gamaka::{GamakaCurve, GamakaRegistry};

use super::ast::Song;
use super::error::CompileError;
use super::svara::{carry_forward, resolve_svara};

/// One pitch transition, or the closing sustain.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneSegment<'r> {
    /// Semitones from the shruti at the start of the segment.
    pub start_note: i32,
    /// Semitones from the shruti at the end of the segment.
    pub end_note: i32,
    /// Length in svara units.
    pub duration: u32,
    pub gamaka: &'r GamakaCurve,
    /// Position of the starting svara.
    pub line: usize,
    pub col: usize,
}

impl TuneSegment<'_> {
    /// True for a segment that holds one pitch.
    pub fn is_sustain(&self) -> bool {
        self.start_note == self.end_note
    }
}

/// Resolve every svara and gamaka of `song` and pair them into segments.
pub fn build_segments<'r>(
    song: &Song,
    registry: &'r GamakaRegistry,
) -> Result<Vec<TuneSegment<'r>>, CompileError> {
    let svaras: Vec<_> = song.svaras().collect();

    let pitches = svaras
        .iter()
        .map(|s| resolve_svara(s))
        .collect::<Result<Vec<_>, _>>()?;
    let notes = carry_forward(&pitches).ok_or_else(|| {
        let first = svaras[0];
        CompileError::music(
            "continuation ',' has no preceding svara",
            first.line,
            first.col,
        )
    })?;

    let curves = song
        .gamakas()
        .map(|g| {
            registry.get(&g.name).ok_or_else(|| {
                CompileError::music(format!("not a gamaka: {}", g.name), g.line, g.col)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some(&last) = notes.last() else {
        return Ok(Vec::new());
    };

    let segments: Vec<TuneSegment<'r>> = svaras
        .iter()
        .zip(&curves)
        .enumerate()
        .map(|(n, (svara, &gamaka))| TuneSegment {
            start_note: notes[n],
            end_note: notes.get(n + 1).copied().unwrap_or(last),
            duration: svara.duration,
            gamaka,
            line: svara.line,
            col: svara.col,
        })
        .collect();

    tracing::debug!(
        svaras = svaras.len(),
        segments = segments.len(),
        "built tune segments"
    );
    Ok(segments)
}
