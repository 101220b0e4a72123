//! Export document assembly and serialization.

mod assembler;

pub use assembler::{
    export, export_to_file, export_to_writer, ExportOptions, ExportOutcome, DEFAULT_FILENAME,
};
