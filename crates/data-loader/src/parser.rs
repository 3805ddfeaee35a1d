//! Parsers for the two catalog artifacts.
//!
//! - movies.dat: movieId::title::tags (tags may be missing)
//! - similarity.dat: one matrix row per line, whitespace-separated floats
//!
//! Blank lines are skipped in both files. Reported line numbers refer to the
//! raw file so they can be matched against an editor.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::io::ErrorKind;
use std::path::Path;

/// Read a UTF-8 file, mapping a missing file to `FileNotFound`
fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Non-blank lines paired with their 1-based line number
fn numbered_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.dat file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = read_to_string(path)?;
    parse_movies_str(&content, &file_name(path))
}

/// Parse catalog rows from text. `file` is only used in error messages.
///
/// Each line is `id::title::tags` with tags optional. Titles cannot contain
/// `::`: the second separator always starts the tags field, so
/// `1::Foo::Bar::x` is title `Foo` with tags `Bar::x`.
pub fn parse_movies_str(content: &str, file: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (line_no, line) in numbered_lines(content) {
        let mut parts = line.splitn(3, "::");

        let movie_id = parts.next().unwrap_or_default().trim();
        let title = parts
            .next()
            .ok_or_else(|| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing title".to_string(),
            })?;
        let tags = parts.next().unwrap_or_default();

        let movie = Movie {
            id: movie_id.parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid movieId '{}': {}", movie_id, e),
            })?,
            title: title.to_string(),
            tags: tags.to_string(),
        };

        movies.push(movie);
    }

    Ok(movies)
}

/// Parse the similarity.dat file
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let content = read_to_string(path)?;
    parse_similarity_str(&content, &file_name(path))
}

/// Parse matrix rows from text. Rows are parsed in parallel.
pub fn parse_similarity_str(content: &str, file: &str) -> Result<SimilarityMatrix> {
    let rows = numbered_lines(content)
        .into_par_iter()
        .map(|(line_no, line)| parse_score_row(line, line_no, file))
        .collect::<Result<Vec<Vec<f32>>>>()?;

    SimilarityMatrix::from_rows(rows)
}

fn parse_score_row(line: &str, line_no: usize, file: &str) -> Result<Vec<f32>> {
    line.split_whitespace()
        .map(|value| {
            value.parse::<f32>().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid score '{}': {}", value, e),
            })
        })
        .collect()
}
