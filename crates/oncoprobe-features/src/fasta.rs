//! Amino-acid sequence validation and FASTA rendering.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use oncoprobe_common::{OncoprobeError, Result};

/// 20 standard residues plus the IUPAC extended codes B, J, O, U, X, Z.
const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWYBJOUXZ";

/// Line width used when wrapping the sequence body.
const FASTA_WIDTH: usize = 60;

/// Strip whitespace, uppercase, and validate against the amino-acid alphabet.
pub fn normalise_sequence(raw: &str) -> Result<String> {
    let sequence: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if sequence.is_empty() {
        return Err(OncoprobeError::InvalidSequence(
            "sequence is empty".to_string(),
        ));
    }

    if let Some(bad) = sequence.chars().find(|c| !AMINO_ACIDS.contains(*c)) {
        return Err(OncoprobeError::InvalidSequence(format!(
            "unexpected residue code '{}'",
            bad
        )));
    }

    Ok(sequence)
}

/// Validate a UniProt accession before it is used in a file name or FASTA
/// header. Alphanumerics plus '-' and '_' only, so a request-supplied ID
/// can never carry path separators out of the scratch directory.
pub fn validate_accession(uniprot_id: &str) -> Result<()> {
    if uniprot_id.is_empty() {
        return Err(OncoprobeError::InvalidAccession("empty".to_string()));
    }
    if let Some(bad) = uniprot_id
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(OncoprobeError::InvalidAccession(format!(
            "unexpected character '{}'",
            bad
        )));
    }
    Ok(())
}

/// Render a normalised sequence as FASTA and write it into `dir`.
/// The record header is the UniProt ID; the body is wrapped at 60 columns.
pub async fn write_fasta(dir: &Path, uniprot_id: &str, sequence: &str) -> Result<PathBuf> {
    validate_accession(uniprot_id)?;
    let mut fasta = format!(">{}\n", uniprot_id);
    let bytes = sequence.as_bytes();
    for chunk in bytes.chunks(FASTA_WIDTH) {
        // Safe: normalise_sequence only admits ASCII residues
        fasta.push_str(std::str::from_utf8(chunk).expect("ASCII sequence"));
        fasta.push('\n');
    }

    let path = dir.join(format!("{}.fasta", uniprot_id));
    fs::write(&path, fasta).await?;
    debug!(?path, len = sequence.len(), "FASTA written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_strips_and_uppercases() {
        let seq = normalise_sequence(" mktv\nLLAC ").unwrap();
        assert_eq!(seq, "MKTVLLAC");
    }

    #[test]
    fn test_normalise_rejects_empty() {
        assert!(normalise_sequence("  \n ").is_err());
    }

    #[test]
    fn test_normalise_rejects_non_residues() {
        let err = normalise_sequence("MKT1VL").unwrap_err();
        assert!(err.to_string().contains('1'));
    }

    #[test]
    fn test_normalise_accepts_extended_codes() {
        assert!(normalise_sequence("MXUBZJO").is_ok());
    }

    #[test]
    fn test_validate_accession_accepts_uniprot_shapes() {
        assert!(validate_accession("P00533").is_ok());
        assert!(validate_accession("A0A024R1R8").is_ok());
        assert!(validate_accession("P04637-2").is_ok());
    }

    #[test]
    fn test_validate_accession_rejects_separators() {
        assert!(validate_accession("../escaped").is_err());
        assert!(validate_accession("a/b").is_err());
        assert!(validate_accession("a\\b").is_err());
        assert!(validate_accession("").is_err());
    }

    #[tokio::test]
    async fn test_write_fasta_stays_inside_scratch_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();

        let err = write_fasta(&scratch, "../escaped", "MKTV").await.unwrap_err();
        assert!(matches!(err, OncoprobeError::InvalidAccession(_)));
        assert!(!dir.path().join("escaped.fasta").exists());
    }

    #[tokio::test]
    async fn test_write_fasta_wraps_at_sixty() {
        let dir = tempfile::tempdir().unwrap();
        let sequence: String = std::iter::repeat('A').take(130).collect();
        let path = write_fasta(dir.path(), "P04637", &sequence).await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ">P04637");
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2].len(), 60);
        assert_eq!(lines[3].len(), 10);
    }
}
