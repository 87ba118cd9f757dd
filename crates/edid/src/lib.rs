//! EDID override generation for external displays.
//!
//! Scans a hardware registry dump for EDID blocks, identifies the external
//! displays they belong to, and produces display override property lists that
//! force RGB 4:4:4 color output.
//!
//! The pipeline is split so each stage can be exercised without a filesystem:
//!
//! * [`scan`] finds raw EDID candidates and identity fields in dump text
//! * [`extract`] turns candidates into [`DisplayRecord`]s
//! * [`name`] decodes the monitor name descriptor
//! * [`emit`] builds and writes one display's override
//! * [`patch`] rewrites the base EDID block
//! * [`plist`] serializes the override document
//! * [`sink`] writes documents to a directory or memory
//! * [`pipeline`] ties the stages together

/// Per-display override output.
pub mod emit;
/// Error types shared across the pipeline stages.
pub mod error;
/// Display identification from scanned candidates.
pub mod extract;
/// Cleaning and installing generated override directories.
pub mod install;
/// Monitor name descriptor decoding.
pub mod name;
/// Base block patching and checksum repair.
pub mod patch;
/// End-to-end extraction and emission.
pub mod pipeline;
/// Override property list serialization.
pub mod plist;
/// Registry dump scanning.
pub mod scan;
/// Output destinations for override documents.
pub mod sink;

pub use emit::build_override;
pub use error::{EdidError, EmitError, ExtractError, InstallError, Result};
pub use extract::{DisplayRecord, Extraction, Extractor, RejectReason, Rejection, Strategy};
pub use install::{clean_overrides, default_overrides_dir, install_overrides};
pub use name::decode_monitor_name;
pub use patch::PatchedEdid;
pub use pipeline::{DisplayFailure, NO_DISPLAYS_HELP, RunOptions, RunSummary, run};
pub use plist::{DisplayIsTv, OverrideDescriptor, ParseDisplayIsTvError};
pub use scan::{CandidateFinder, IoregFinder, RegistryScan};
pub use sink::{DirSink, FileSink, MemorySink};
