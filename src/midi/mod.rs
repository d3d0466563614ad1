//! MIDI output: event model, render driver, and Standard MIDI File writer.

pub mod event;
pub mod renderer;
pub mod smf;

pub use event::{MidiEvent, MidiMessage};
pub use renderer::{render, Renderer, PITCH_BEND_RANGE};
pub use smf::Smf;
