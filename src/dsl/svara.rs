//! Svara name resolution: converts "sa", "ri2", "pa+" to semitone offsets
//! from the shruti (reference note).

use super::ast::Svara;
use super::error::CompileError;
use super::token::CONTINUATION;

/// Svara names in scale order. A name's index is its offset in semitones
/// from the shruti: with the shruti at MIDI note 60, "ri2" is note 62.
pub const SVARA_NAMES: [&str; 12] = [
    "sa", "ri1", "ri2", "ga1", "ga2", "ma1", "ma2", "pa", "da1", "da2", "ni1", "ni2",
];

/// A svara's pitch relative to the shruti.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    /// Semitones above (or below) the shruti.
    Offset(i32),
    /// Same pitch as the previous svara.
    Continuation,
}

/// Parse a svara name into a pitch.
///
/// Format: `<name><optional octave>`
/// - Name: one of [`SVARA_NAMES`], or `,` for a continuation
/// - Octave: `+` (one octave up) or `-` (one octave down)
pub fn parse_svara_name(name: &str) -> Option<Pitch> {
    if name == CONTINUATION {
        return Some(Pitch::Continuation);
    }

    let (base, octave) = if let Some(base) = name.strip_suffix('+') {
        (base, 1)
    } else if let Some(base) = name.strip_suffix('-') {
        (base, -1)
    } else {
        (name, 0)
    };

    let index = SVARA_NAMES.iter().position(|&s| s == base)?;
    Some(Pitch::Offset(index as i32 + octave * 12))
}

/// Resolve a parsed svara, reporting unknown names at the svara's position.
pub fn resolve_svara(svara: &Svara) -> Result<Pitch, CompileError> {
    parse_svara_name(&svara.name).ok_or_else(|| {
        CompileError::music(format!("not a svara: {}", svara.name), svara.line, svara.col)
    })
}

/// Replace every continuation with the pitch before it, in one left-to-right pass.
///
/// Returns `None` when the first pitch is a continuation.
pub fn carry_forward(pitches: &[Pitch]) -> Option<Vec<i32>> {
    let mut resolved: Vec<i32> = Vec::with_capacity(pitches.len());
    for pitch in pitches {
        let offset = match *pitch {
            Pitch::Offset(offset) => offset,
            Pitch::Continuation => *resolved.last()?,
        };
        resolved.push(offset);
    }
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(name: &str) -> Option<i32> {
        match parse_svara_name(name)? {
            Pitch::Offset(n) => Some(n),
            Pitch::Continuation => None,
        }
    }

    #[test]
    fn sa_is_the_shruti() {
        assert_eq!(offset("sa"), Some(0));
    }

    #[test]
    fn ri2() {
        assert_eq!(offset("ri2"), Some(2));
    }

    #[test]
    fn pa_upper_octave() {
        assert_eq!(offset("pa+"), Some(19));
    }

    #[test]
    fn sa_lower_octave() {
        assert_eq!(offset("sa-"), Some(-12));
    }

    #[test]
    fn ni2_lower_octave() {
        assert_eq!(offset("ni2-"), Some(-1));
    }

    #[test]
    fn all_svaras_in_order() {
        for (i, name) in SVARA_NAMES.iter().enumerate() {
            assert_eq!(offset(name), Some(i as i32));
        }
    }

    #[test]
    fn comma_is_continuation() {
        assert_eq!(parse_svara_name(","), Some(Pitch::Continuation));
    }

    #[test]
    fn invalid_names() {
        assert_eq!(parse_svara_name("xx"), None);
        assert_eq!(parse_svara_name("Sa"), None);
        assert_eq!(parse_svara_name("ri"), None);
        assert_eq!(parse_svara_name("+"), None);
        assert_eq!(parse_svara_name("sa++"), None);
        assert_eq!(parse_svara_name(""), None);
    }

    #[test]
    fn resolve_svara_reports_position() {
        let svara = Svara {
            name: "xx".to_string(),
            duration: 1,
            line: 4,
            col: 9,
        };
        let err = resolve_svara(&svara).unwrap_err();
        assert_eq!(err.kind, crate::dsl::error::ErrorKind::MusicError);
        assert_eq!((err.line, err.col), (4, 9));
        assert!(err.message.contains("xx"));
    }

    #[test]
    fn carry_forward_repeats_previous() {
        let pitches = [Pitch::Offset(0), Pitch::Continuation, Pitch::Continuation];
        assert_eq!(carry_forward(&pitches), Some(vec![0, 0, 0]));
    }

    #[test]
    fn carry_forward_uses_nearest_preceding() {
        let pitches = [
            Pitch::Offset(2),
            Pitch::Continuation,
            Pitch::Offset(7),
            Pitch::Continuation,
        ];
        assert_eq!(carry_forward(&pitches), Some(vec![2, 2, 7, 7]));
    }

    #[test]
    fn carry_forward_rejects_leading_continuation() {
        assert_eq!(carry_forward(&[Pitch::Continuation, Pitch::Offset(0)]), None);
    }

    #[test]
    fn carry_forward_empty() {
        assert_eq!(carry_forward(&[]), Some(vec![]));
    }
}
