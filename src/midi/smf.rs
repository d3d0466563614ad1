//! Standard MIDI File writer: persists rendered events as a single track.

use std::io;
use std::path::Path;

use super::event::MidiEvent;

/// Ticks per quarter note written to the file header.
pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;

/// An in-memory MIDI file.
#[derive(Debug, Clone, PartialEq)]
pub struct Smf {
    ticks_per_beat: u16,
    tracks: Vec<Vec<MidiEvent>>,
}

impl Smf {
    pub fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat,
            tracks: Vec::new(),
        }
    }

    /// Append a track holding `events` in order.
    pub fn with_track(mut self, events: Vec<MidiEvent>) -> Self {
        self.tracks.push(events);
        self
    }

    pub fn tracks(&self) -> &[Vec<MidiEvent>] {
        &self.tracks
    }

    /// Serialize as a format 1 file.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::new();

        data.extend_from_slice(b"MThd");
        data.extend_from_slice(&6u32.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&(self.tracks.len() as u16).to_be_bytes());
        data.extend_from_slice(&self.ticks_per_beat.to_be_bytes());

        for events in &self.tracks {
            let mut track = Vec::new();
            for event in events {
                write_variable_length(&mut track, event.delta_ticks);
                event.message.encode(event.channel, &mut track);
            }
            // End of track
            track.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

            data.extend_from_slice(b"MTrk");
            data.extend_from_slice(&(track.len() as u32).to_be_bytes());
            data.extend_from_slice(&track);
        }

        data
    }

    /// Write the file to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_bytes())
    }
}

/// Append `value` as a MIDI variable-length quantity (7 bits per byte, MSB first).
fn write_variable_length(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; 5];
    let mut i = buf.len() - 1;
    let mut v = value;
    buf[i] = (v & 0x7F) as u8;
    v >>= 7;
    while v > 0 {
        i -= 1;
        buf[i] = ((v & 0x7F) as u8) | 0x80;
        v >>= 7;
    }
    out.extend_from_slice(&buf[i..]);
}
