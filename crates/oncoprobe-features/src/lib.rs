//! oncoprobe-features — Sequence-to-FASTA conversion and delegation to the
//! external feature-extraction tool (file-in/file-out CSV), followed by a
//! column merge of the produced CSVs into a single feature row.

pub mod extractor;
pub mod fasta;
pub mod merge;

pub use extractor::{ExtractorCommand, FeatureExtractor};
pub use fasta::{normalise_sequence, validate_accession, write_fasta};
pub use merge::{merge_feature_csvs, FeatureRow};
