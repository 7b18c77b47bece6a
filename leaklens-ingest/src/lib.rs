//! leaklens-ingest: statement row sources (delimited text, extracted table
//! rows), header-agnostic field resolution, and the row -> transaction
//! synthesizer.

pub mod csv_rows;
pub mod fields;
pub mod synth;
pub mod table_rows;
pub mod types;

pub use synth::{extract_transactions, extract_transactions_with, Synthesizer};
pub use types::{IngestError, RawRow, StatementFormat};
