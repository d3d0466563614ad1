//! Vaadya: compiles Carnatic svara and gamaka notation into pitch-bent MIDI.

pub mod config;
pub mod dsl;
pub mod gamaka;
pub mod midi;
