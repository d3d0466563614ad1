//! MIDI event model: the rendered output of a compile.

/// A channel message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    ProgramChange { program: u8 },
    ControlChange { controller: u8, value: u8 },
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    /// Signed bend, -8192..=8191; 0 is no bend.
    PitchBend { value: i16 },
}

/// A message with its delay after the previous event, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    pub delta_ticks: u32,
    pub channel: u8,
    pub message: MidiMessage,
}

impl MidiMessage {
    /// Append the wire bytes for this message on `channel`.
    ///
    /// - Note Off: [0x80 | channel, note, 0]
    /// - Note On:  [0x90 | channel, note, velocity]
    /// - CC:       [0xB0 | channel, controller, value]
    /// - Program:  [0xC0 | channel, program]
    /// - Bend:     [0xE0 | channel, lsb, msb] of the value biased by 8192
    pub fn encode(&self, channel: u8, out: &mut Vec<u8>) {
        let channel = channel & 0x0F;
        match *self {
            MidiMessage::NoteOff { note } => out.extend_from_slice(&[0x80 | channel, note & 0x7F, 0]),
            MidiMessage::NoteOn { note, velocity } => {
                out.extend_from_slice(&[0x90 | channel, note & 0x7F, velocity & 0x7F])
            }
            MidiMessage::ControlChange { controller, value } => {
                out.extend_from_slice(&[0xB0 | channel, controller & 0x7F, value & 0x7F])
            }
            MidiMessage::ProgramChange { program } => {
                out.extend_from_slice(&[0xC0 | channel, program & 0x7F])
            }
            MidiMessage::PitchBend { value } => {
                let biased = (i32::from(value) + 8192).clamp(0, 0x3FFF) as u16;
                out.extend_from_slice(&[
                    0xE0 | channel,
                    (biased & 0x7F) as u8,
                    ((biased >> 7) & 0x7F) as u8,
                ]);
            }
        }
    }
}

impl MidiEvent {
    pub fn new(delta_ticks: u32, channel: u8, message: MidiMessage) -> Self {
        Self {
            delta_ticks,
            channel,
            message,
        }
    }
}
