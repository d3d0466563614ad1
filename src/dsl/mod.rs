//! Svara compiler: notation → tokens → phrase tree → tune segments → MIDI events.

pub mod ast;
pub mod compile;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod svara;
pub mod token;

pub use ast::*;
pub use compile::{build_segments, TuneSegment};
pub use error::{CompileError, ErrorKind};

use crate::config::RenderConfig;
use crate::gamaka::GamakaRegistry;
use crate::midi::{render, MidiEvent, Smf};

use lexer::Lexer;
use parser::Parser;
use token::Token;

/// The result of compiling a song.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSong {
    pub events: Vec<MidiEvent>,
    pub segment_count: usize,
}

impl CompiledSong {
    /// Package the events as a single-track MIDI file.
    pub fn to_smf(&self, ticks_per_beat: u16) -> Smf {
        Smf::new(ticks_per_beat).with_track(self.events.clone())
    }
}

/// The svara compiler.
///
/// Runs source text through lexer → parser → segment builder → renderer.
pub struct Compiler;

impl Compiler {
    /// Lex source text into tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
        Lexer::new(source).tokenize()
    }

    /// Parse source text into a Song.
    pub fn parse(source: &str) -> Result<Song, CompileError> {
        let tokens = Self::tokenize(source)?;
        tracing::debug!(tokens = tokens.len(), "lexed source");
        let song = Parser::new(tokens).parse()?;
        tracing::debug!(lines = song.lines.len(), "parsed song");
        Ok(song)
    }

    /// Parse source text and build its tune segments.
    pub fn segments<'r>(
        source: &str,
        registry: &'r GamakaRegistry,
    ) -> Result<Vec<TuneSegment<'r>>, CompileError> {
        let song = Self::parse(source)?;
        build_segments(&song, registry)
    }

    /// Compile source text into MIDI events.
    pub fn compile(
        source: &str,
        config: &RenderConfig,
        registry: &GamakaRegistry,
    ) -> Result<CompiledSong, CompileError> {
        let segments = Self::segments(source, registry)?;
        let events = render(&segments, config)?;
        Ok(CompiledSong {
            events,
            segment_count: segments.len(),
        })
    }
}
