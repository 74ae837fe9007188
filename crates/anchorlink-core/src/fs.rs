use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{LinkError, Result};
use crate::markdown::scan_metadata;
use crate::models::{DocumentMetadata, DocumentRecord};
use crate::vault::{Vault, content_etag};

/// Filesystem-backed vault: a directory tree of markdown documents.
///
/// Paths handed out and accepted are vault-relative with `/` separators.
/// Structural metadata comes from the built-in markdown scanner.
#[derive(Debug, Clone)]
pub struct LocalVault {
    root: PathBuf,
    markdown_files: GlobSet,
}

impl LocalVault {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let mut builder = GlobSetBuilder::new();
        for pattern in ["*.md", "*.markdown"] {
            let glob = Glob::new(pattern)
                .map_err(|err| LinkError::Internal(format!("invalid file glob: {err}")))?;
            builder.add(glob);
        }
        let markdown_files = builder
            .build()
            .map_err(|err| LinkError::Internal(format!("file glob set: {err}")))?;

        Ok(Self {
            root,
            markdown_files,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|part| matches!(part, Component::ParentDir))
        {
            return Err(LinkError::Validation(format!(
                "path escapes the vault root: {path}"
            )));
        }
        Ok(self.root.join(relative))
    }

    fn vault_relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<&str> = relative
            .components()
            .filter_map(|part| match part {
                Component::Normal(segment) => segment.to_str(),
                _ => None,
            })
            .collect();
        Some(segments.join("/"))
    }
}

impl Vault for LocalVault {
    fn list_documents(&self) -> Result<Vec<DocumentRecord>> {
        let mut documents = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                // depth 0 is the vault root itself; its name is not subject
                // to the hidden-entry rule.
                entry.depth() == 0 || !is_hidden(entry.file_name().to_str())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            if !entry.file_type().is_file()
                || !self.markdown_files.is_match(entry.file_name())
            {
                continue;
            }
            let Some(path) = self.vault_relative(entry.path()) else {
                continue;
            };
            // A file that disappears or turns unreadable mid-walk is dropped
            // from the corpus rather than failing the enumeration.
            let Ok(content) = fs::read_to_string(entry.path()) else {
                continue;
            };
            documents.push(DocumentRecord {
                path,
                etag: content_etag(&content),
            });
        }
        Ok(documents)
    }

    fn read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(LinkError::NotFound(path.to_string()));
        }
        Ok(fs::read_to_string(full)?)
    }

    fn metadata(&self, path: &str) -> Result<Option<DocumentMetadata>> {
        Ok(Some(scan_metadata(&self.read(path)?)))
    }

    fn append_to_line(
        &self,
        path: &str,
        line: usize,
        text: &str,
        expected_etag: &str,
    ) -> Result<String> {
        let full = self.resolve(path)?;
        let content = self.read(path)?;
        if content_etag(&content) != expected_etag {
            return Err(LinkError::Conflict(format!(
                "document changed since it was scanned: {path}"
            )));
        }

        let mut lines: Vec<String> = content.split('\n').map(ToString::to_string).collect();
        let Some(target) = lines.get_mut(line) else {
            return Err(LinkError::Validation(format!(
                "line {line} is out of range for {path}"
            )));
        };
        if let Some(stripped) = target.strip_suffix('\r') {
            *target = format!("{stripped}{text}\r");
        } else {
            target.push_str(text);
        }

        let updated = lines.join("\n");
        write_atomic(&full, &updated)?;
        Ok(content_etag(&updated))
    }
}

fn is_hidden(file_name: Option<&str>) -> bool {
    file_name.is_some_and(|name| name.starts_with('.'))
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        LinkError::Validation(format!("target has no parent: {}", path.display()))
    })?;
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(|x| x.to_str())
        .ok_or_else(|| {
            LinkError::Validation(format!("invalid target filename: {}", path.display()))
        })?;
    let tmp_name = format!(".{file_name}.anchorlink.tmp.{}", uuid::Uuid::new_v4().simple());
    let tmp_path = parent.join(tmp_name);

    {
        let mut tmp = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)?;
        tmp.write_all(content.as_bytes())?;
        tmp.sync_all()?;
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(LinkError::from(err));
    }

    if let Ok(dir) = fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}
