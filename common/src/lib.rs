//! Tester Lookup Common Library
//!
//! CLIとHTTP APIで共有される型と照合ロジック

pub mod normalize;
pub mod wave;
pub mod types;
pub mod matcher;
pub mod resolver;
pub mod columns;
pub mod dataset;
pub mod status;
pub mod error;

pub use normalize::{normalize, NormalizedKey};
pub use wave::{WaveSpec, WaveValue};
pub use types::{AssignmentRow, AssignmentSnapshot};
pub use matcher::{explain_assignments, find_assignment_indices, find_assignments, MatchDiagnostics, WaveCheck};
pub use resolver::{resolve_text, TextMatrix, TextResolution};
pub use columns::{find_column, Column, ColumnMap};
pub use dataset::Dataset;
pub use status::{SilentStatus, StatusSink};
#[cfg(any(test, feature = "testing"))]
pub use status::RecordingStatus;
pub use error::{Error, Result};
