//! Loading the DataIndex from disk.
//!
//! Both artifacts are parsed in parallel, then paired. The pairing step is
//! where a catalog/matrix size mismatch is caught, so a process that gets a
//! `DataIndex` back can serve queries without re-checking alignment.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

/// File name of the catalog artifact inside the data directory
pub const MOVIES_FILE: &str = "movies.dat";

/// File name of the similarity artifact inside the data directory
pub const SIMILARITY_FILE: &str = "similarity.dat";

impl DataIndex {
    /// Load the catalog and similarity matrix from a directory
    ///
    /// Steps:
    /// 1. Parse movies.dat and similarity.dat in parallel
    /// 2. Check the matrix is square (done while parsing)
    /// 3. Check the catalog and matrix have the same number of rows
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog artifacts from {:?}", data_dir);

        let movies_path = data_dir.join(MOVIES_FILE);
        let similarity_path = data_dir.join(SIMILARITY_FILE);

        let (movies, similarity) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );

        let movies = movies?;
        let similarity = similarity?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix",
            movies.len(),
            similarity.dimension(),
            similarity.dimension()
        );

        let index = DataIndex::new(Catalog::new(movies), similarity)?;

        info!("DataIndex successfully built and validated");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use std::fs;
    use tempfile::TempDir;

    fn write_artifacts(movies: &str, similarity: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MOVIES_FILE), movies).unwrap();
        fs::write(dir.path().join(SIMILARITY_FILE), similarity).unwrap();
        dir
    }

    #[test]
    fn test_load_dataset() {
        let dir = write_artifacts(
            "1::Alpha::a\n2::Beta::b\n3::Gamma::c\n",
            "1.0 0.8 0.3\n0.8 1.0 0.5\n0.3 0.5 1.0\n",
        );

        let index = DataIndex::load_from_files(dir.path()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.catalog().get(1).unwrap().title, "Beta");
        assert_eq!(index.similarity().get(0, 1), Some(0.8));
    }

    #[test]
    fn test_load_rejects_row_count_mismatch() {
        let dir = write_artifacts("1::Alpha\n2::Beta\n3::Gamma\n", "1.0 0.5\n0.5 1.0\n");

        let err = DataIndex::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::RowCountMismatch { catalog: 3, matrix: 2 }
        ));
    }

    #[test]
    fn test_load_missing_similarity_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MOVIES_FILE), "1::Alpha\n").unwrap();

        let err = DataIndex::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_missing_directory() {
        let err = DataIndex::load_from_files(Path::new("no/such/dir")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
