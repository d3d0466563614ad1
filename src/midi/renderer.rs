//! Render driver: turns tune segments into note and pitch-bend events.
//!
//! One note sounds at a time. Within a segment the note stays put and the
//! pitch wheel carries the gamaka: every tick gets one pitch-bend event.

use crate::config::RenderConfig;
use crate::dsl::compile::TuneSegment;
use crate::dsl::error::CompileError;

use super::event::{MidiEvent, MidiMessage};

/// Pitch-bend range in semitones, each way.
pub const PITCH_BEND_RANGE: u8 = 12;

const BEND_MIN: i32 = -8192;
const BEND_MAX: i32 = 8191;

/// Registered parameter number controllers.
const RPN_MSB: u8 = 0x65;
const RPN_LSB: u8 = 0x64;
const DATA_ENTRY_MSB: u8 = 0x06;
const DATA_ENTRY_LSB: u8 = 0x26;

/// Convert a bend in semitones to a pitch-wheel value for a ±1 octave range.
pub fn bend_value(semitones: f64) -> i16 {
    let value = (semitones / f64::from(PITCH_BEND_RANGE) * 8192.0) as i32;
    value.clamp(BEND_MIN, BEND_MAX) as i16
}

/// Messages setting the pitch-bend sensitivity to [`PITCH_BEND_RANGE`].
pub fn pitch_bend_range_sequence() -> [MidiMessage; 6] {
    let cc = |controller, value| MidiMessage::ControlChange { controller, value };
    [
        // Select RPN 0: pitch-bend sensitivity
        cc(RPN_MSB, 0x00),
        cc(RPN_LSB, 0x00),
        // Coarse: semitones; fine: cents
        cc(DATA_ENTRY_MSB, PITCH_BEND_RANGE),
        cc(DATA_ENTRY_LSB, 0),
        // Deselect, so later data entry changes nothing
        cc(RPN_MSB, 0x7F),
        cc(RPN_LSB, 0x7F),
    ]
}

/// Emits MIDI events and keeps track of time and the sounding note.
pub struct Renderer<'c> {
    config: &'c RenderConfig,
    gap_ticks: u32,
    current_note: Option<u8>,
    events: Vec<MidiEvent>,
}

impl<'c> Renderer<'c> {
    /// Start a stream with the program change and pitch-bend range setup.
    pub fn new(config: &'c RenderConfig) -> Self {
        let mut renderer = Self {
            config,
            gap_ticks: 0,
            current_note: None,
            events: Vec::new(),
        };
        renderer.emit(MidiMessage::ProgramChange {
            program: config.program,
        });
        for message in pitch_bend_range_sequence() {
            renderer.emit(message);
        }
        renderer
    }

    /// The note currently sounding, if any.
    pub fn current_note(&self) -> Option<u8> {
        self.current_note
    }

    /// Move forward in time by `ticks`.
    pub fn advance(&mut self, ticks: u32) {
        self.gap_ticks += ticks;
    }

    /// Push an event carrying the ticks elapsed since the previous one.
    fn emit(&mut self, message: MidiMessage) {
        self.events.push(MidiEvent::new(
            self.gap_ticks,
            self.config.channel,
            message,
        ));
        self.gap_ticks = 0;
    }

    /// Sound `note` unless it is already sounding. The new note starts before
    /// the old one stops.
    pub fn play_note(&mut self, note: u8) {
        if self.current_note == Some(note) {
            return;
        }
        self.emit(MidiMessage::NoteOn {
            note,
            velocity: self.config.velocity,
        });
        if let Some(old) = self.current_note {
            self.emit(MidiMessage::NoteOff { note: old });
        }
        self.current_note = Some(note);
    }

    /// Stop the sounding note, if any.
    pub fn stop_note(&mut self) {
        if let Some(note) = self.current_note.take() {
            self.emit(MidiMessage::NoteOff { note });
        }
    }

    /// Bend the sounding note by `semitones`.
    pub fn bend_pitch(&mut self, semitones: f64) {
        self.emit(MidiMessage::PitchBend {
            value: bend_value(semitones),
        });
    }

    /// Render one segment: start its note, then sample its gamaka every tick.
    pub fn render_segment(&mut self, segment: &TuneSegment<'_>) -> Result<(), CompileError> {
        let note = i32::from(self.config.shruti) + segment.start_note;
        let note = u8::try_from(note)
            .ok()
            .filter(|n| *n <= 127)
            .ok_or_else(|| {
                CompileError::music(
                    format!("note {note} is outside the MIDI range 0-127"),
                    segment.line,
                    segment.col,
                )
            })?;
        self.play_note(note);

        let ticks = segment.duration.saturating_mul(self.config.ticks_per_unit);
        for step in 0..ticks {
            let t = (f64::from(step) / f64::from(ticks)).powi(self.config.ease_exponent);
            let pitch = segment
                .gamaka
                .sample(t, segment.start_note, segment.end_note);
            self.bend_pitch(pitch - f64::from(segment.start_note));
            self.advance(1);
        }
        Ok(())
    }

    /// Stop the last note and return the event stream.
    pub fn finish(mut self) -> Vec<MidiEvent> {
        self.stop_note();
        self.events
    }
}

/// Render all segments into one ordered event stream.
pub fn render(
    segments: &[TuneSegment<'_>],
    config: &RenderConfig,
) -> Result<Vec<MidiEvent>, CompileError> {
    let mut renderer = Renderer::new(config);
    for segment in segments {
        renderer.render_segment(segment)?;
    }
    let events = renderer.finish();
    tracing::debug!(
        segments = segments.len(),
        events = events.len(),
        "rendered MIDI events"
    );
    Ok(events)
}
