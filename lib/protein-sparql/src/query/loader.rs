use crate::error::QueryLoadError;
use crate::query::{QueryMetadata, QueryResource};
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Reads named query resources from a directory.
///
/// A query named `Q1` lives in `<dir>/Q1.<extension>`.
#[derive(Debug, Clone)]
pub struct QueryLoader {
    dir: PathBuf,
    extension: String,
}

impl QueryLoader {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path a query name resolves to.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.extension))
    }

    /// Loads the text and the metadata header of the query `name`.
    pub fn load(&self, name: &str) -> Result<QueryResource, QueryLoadError> {
        let path = self.path_of(name);
        if !is_plain_name(name) {
            return Err(QueryLoadError::ResourceNotFound {
                name: name.to_owned(),
                path,
            });
        }
        let text = fs::read_to_string(&path).map_err(|error| {
            if error.kind() == io::ErrorKind::NotFound {
                QueryLoadError::ResourceNotFound {
                    name: name.to_owned(),
                    path: path.clone(),
                }
            } else {
                QueryLoadError::Io {
                    path: path.clone(),
                    error,
                }
            }
        })?;
        let metadata = QueryMetadata::parse(name, &text)?;
        tracing::debug!(
            query = name,
            path = %path.display(),
            accessions = metadata.accessions().len(),
            count = metadata.count(),
            "loaded query resource"
        );
        Ok(QueryResource {
            name: name.to_owned(),
            text,
            metadata,
        })
    }

    /// Names of all the query resources of the directory, `Q2` sorted before `Q10`.
    pub fn names(&self) -> Result<Vec<String>, QueryLoadError> {
        let io_error = |error: io::Error| QueryLoadError::Io {
            path: self.dir.clone(),
            error,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str())
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort_by(|a, b| natural_cmp(a, b));
        Ok(names)
    }
}

/// Rejects names that would resolve outside of the query directory.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Compares names chunk by chunk, digit runs by numeric value.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    loop {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        let (chunk_a, rest_a) = split_chunk(a);
        let (chunk_b, rest_b) = split_chunk(b);
        let order = match (chunk_a.parse::<u64>(), chunk_b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| chunk_a.len().cmp(&chunk_b.len())),
            _ => chunk_a.cmp(chunk_b),
        };
        if order != Ordering::Equal {
            return order;
        }
        (a, b) = (rest_a, rest_b);
    }
}

fn split_chunk(s: &str) -> (&str, &str) {
    let digits = s.starts_with(|c: char| c.is_ascii_digit());
    let end = s
        .find(|c: char| c.is_ascii_digit() != digits)
        .unwrap_or(s.len());
    s.split_at(end)
}
