//! Serializers for the renderer's graph-loading formats.

mod json;
mod sink;
mod triple;

pub use json::JsonGraphEncoder;
pub use sink::{DirectorySink, MemorySink, OutputSink};
pub use triple::{TripleFiles, TripleKind, TripleTextEncoder};

use std::io::Write;

use crate::error::EncodeError;

/// Opens `name` on `sink`, runs `body` against it and flushes the writer.
fn with_output<S, F>(sink: &mut S, name: &str, body: F) -> Result<(), EncodeError>
where
    S: OutputSink + ?Sized,
    F: FnOnce(&mut dyn Write) -> Result<(), EncodeError>,
{
    let io_error = |source| EncodeError::Io {
        name: name.to_owned(),
        source,
    };
    let mut writer = sink.create(name).map_err(io_error)?;
    body(&mut writer)?;
    writer.flush().map_err(io_error)
}
