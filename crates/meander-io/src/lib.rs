//! File I/O, validation, and serialization for the meander pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{Collection, RunName, SeriesId};
pub use error::IoError;
pub use reader::{CollectionReader, SeriesReader};
pub use writer::ResultWriter;
