use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Fragment not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read one fragment document and return its content
pub fn read_fragment(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Read an ordered list of fragments, preserving the caller's order
pub fn read_fragments(paths: &[RelativePathBuf], root: &Path) -> Result<Vec<String>, IoError> {
    paths
        .iter()
        .map(|path| read_fragment(path, root))
        .collect()
}

/// Write the consolidated declaration document
pub fn write_output(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_fragment(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn reads_a_fragment() {
        let dir = TempDir::new().unwrap();
        create_fragment(&dir, "es5.md", "# Core\n");

        let content = read_fragment(RelativePath::new("es5.md"), dir.path()).unwrap();
        assert_eq!(content, "# Core\n");
    }

    #[test]
    fn missing_fragment_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = read_fragment(RelativePath::new("missing.md"), dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn reads_fragments_in_caller_order() {
        let dir = TempDir::new().unwrap();
        create_fragment(&dir, "b.md", "second");
        create_fragment(&dir, "a.md", "first");

        let paths = vec![
            RelativePathBuf::from("b.md"),
            RelativePathBuf::from("a.md"),
        ];
        let contents = read_fragments(&paths, dir.path()).unwrap();
        assert_eq!(contents, vec!["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn one_missing_fragment_fails_the_whole_read() {
        let dir = TempDir::new().unwrap();
        create_fragment(&dir, "a.md", "first");

        let paths = vec![
            RelativePathBuf::from("a.md"),
            RelativePathBuf::from("gone.md"),
        ];
        assert!(read_fragments(&paths, dir.path()).is_err());
    }

    #[test]
    fn write_output_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = RelativePath::new("typings/out.d.ts");

        write_output(path, dir.path(), "declare module \"x\" {\n}").unwrap();

        let written = fs::read_to_string(path.to_path(dir.path())).unwrap();
        assert_eq!(written, "declare module \"x\" {\n}");
    }

    #[test]
    fn write_output_overwrites_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = RelativePath::new("out.d.ts");

        write_output(path, dir.path(), "old").unwrap();
        write_output(path, dir.path(), "new").unwrap();

        let written = fs::read_to_string(path.to_path(dir.path())).unwrap();
        assert_eq!(written, "new");
    }
}
