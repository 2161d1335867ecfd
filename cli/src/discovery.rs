// Copyright 2026 The Polycheck Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The file-discovery walker: hands the core engine a `Vec<PathBuf>` of
//! absolute file paths, built on the `ignore` crate so `.gitignore` and
//! `.git/info/exclude` are honored the same way a working-copy scan honors
//! them.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use ignore::WalkBuilder;

use crate::error::CliError;

/// Walks `roots` (files or directories), returning every regular file found,
/// as absolute paths. Directories are walked respecting `.gitignore`/
/// `.ignore`; dotfiles are included because several validators key off a
/// leading dot (`.gitlab-ci.yml`). `excludes`, if non-empty, additionally
/// drops any path matching one of the compiled globs.
pub fn discover_files(roots: &[PathBuf], excludes: &GlobSet) -> Result<Vec<PathBuf>, CliError> {
    let cwd = std::env::current_dir().map_err(|source| CliError::Discovery {
        path: PathBuf::from("."),
        source,
    })?;

    let roots: Vec<PathBuf> = if roots.is_empty() {
        vec![cwd.clone()]
    } else {
        roots.to_vec()
    };

    let mut files = Vec::new();
    for root in &roots {
        let absolute_root = absolutize(&cwd, root);
        if absolute_root.is_file() {
            if !excludes.is_match(&absolute_root) {
                files.push(absolute_root);
            }
            continue;
        }

        let mut builder = WalkBuilder::new(&absolute_root);
        builder.hidden(false).git_ignore(true).git_exclude(true);
        for entry in builder.build() {
            let entry = entry.map_err(|err| CliError::Discovery {
                path: absolute_root.clone(),
                source: std::io::Error::other(err.to_string()),
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if !excludes.is_match(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_files_under_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("b.py"), "y = 2\n").unwrap();

        let excludes = GlobSet::empty();
        let files = discover_files(&[dir.path().to_path_buf()], &excludes).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_absolute()));
    }

    #[test]
    fn includes_dotfiles_for_tools_that_key_off_them() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitlab-ci.yml"), "stages: []\n").unwrap();

        let excludes = GlobSet::empty();
        let files = discover_files(&[dir.path().to_path_buf()], &excludes).unwrap();
        assert!(files.iter().any(|f| f.file_name().unwrap() == ".gitlab-ci.yml"));
    }

    #[test]
    fn excludes_matching_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("vendored.py"), "x = 1\n").unwrap();

        let mut builder = globset::GlobSetBuilder::new();
        builder.add(globset::Glob::new("**/vendored.py").unwrap());
        let excludes = builder.build().unwrap();

        let files = discover_files(&[dir.path().to_path_buf()], &excludes).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].file_name().unwrap() == "a.py");
    }
}
