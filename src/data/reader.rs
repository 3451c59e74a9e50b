use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::Id3Error;

/// Reads every record of a delimited file, header included, as raw strings.
///
/// Records may have differing lengths; short rows are reported later by
/// [`Dataset::new`](super::dataset::Dataset::new) as missing values.
#[instrument(skip_all, fields(path = %file_path.as_ref().display()))]
pub fn read_rows(file_path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<Vec<String>>, Id3Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(file_path.as_ref())?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(records = rows.len(), "read delimited file");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::dataset::Dataset;

    #[test]
    fn test_read_rows_semicolon() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Tempo;Vento;Joga\nSol;Fraco;Sim\nChuva;Forte;Nao\n").unwrap();

        let rows = read_rows(file.path(), b';').unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Tempo", "Vento", "Joga"]);

        let dataset = Dataset::new(rows, "Joga", None).unwrap();
        assert_eq!(dataset.attributes(), &["Tempo".to_string(), "Vento".to_string()]);
        assert_eq!(dataset.classes(), &["Sim".to_string(), "Nao".to_string()]);
    }

    #[test]
    fn test_read_rows_missing_file() {
        let result = read_rows("does/not/exist.csv", b',');
        assert!(matches!(result, Err(Id3Error::Csv(_))));
    }
}
