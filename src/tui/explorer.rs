//! Directory browser state for the folder picker

use std::{
    fs,
    path::{Path, PathBuf},
};

use ratatui::widgets::ListState;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_parent: bool,
}

#[derive(Debug)]
pub struct Explorer {
    current: PathBuf,
    entries: Vec<Entry>,
    state: ListState,
    error: Option<String>,
}

impl Explorer {
    pub fn new(start: &Path) -> Result<Self> {
        let current = start.canonicalize()?;
        let entries = list_directories(&current)?;
        let mut explorer = Self {
            current,
            entries,
            state: ListState::default(),
            error: None,
        };
        explorer.select_first();
        Ok(explorer)
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn state_mut(&mut self) -> &mut ListState {
        &mut self.state
    }

    /// Last navigation error, cleared by the next successful move
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.state.selected().and_then(|index| self.entries.get(index))
    }

    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let index = match self.state.selected() {
            Some(index) if index + 1 < self.entries.len() => index + 1,
            _ => 0,
        };
        self.state.select(Some(index));
    }

    pub fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let index = match self.state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(index) => index - 1,
        };
        self.state.select(Some(index));
    }

    /// Descend into the selected entry
    pub fn enter(&mut self) {
        if let Some(entry) = self.selected().cloned() {
            self.change_to(entry.path);
        }
    }

    pub fn parent(&mut self) {
        if let Some(parent) = self.current.parent().map(Path::to_path_buf) {
            self.change_to(parent);
        }
    }

    /// Re-read the current directory, e.g. after a run created a sibling
    pub fn refresh(&mut self) {
        let current = self.current.clone();
        self.change_to(current);
    }

    fn change_to(&mut self, target: PathBuf) {
        match list_directories(&target) {
            Ok(entries) => {
                self.current = target;
                self.entries = entries;
                self.error = None;
                self.select_first();
            }
            Err(e) => self.error = Some(format!("{}: {}", target.display(), e)),
        }
    }

    fn select_first(&mut self) {
        let selection = if self.entries.is_empty() { None } else { Some(0) };
        self.state.select(selection);
    }
}

fn list_directories(dir: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for item in fs::read_dir(dir)? {
        let item = item?;
        let path = item.path();
        if path.is_dir() {
            entries.push(Entry {
                name: item.file_name().to_string_lossy().into_owned(),
                path,
                is_parent: false,
            });
        }
    }
    entries.sort_by_key(|entry| entry.name.to_lowercase());

    if let Some(parent) = dir.parent() {
        entries.insert(
            0,
            Entry {
                name: "..".into(),
                path: parent.to_path_buf(),
                is_parent: true,
            },
        );
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        dir
    }

    #[test]
    fn lists_only_directories_sorted() {
        let dir = tree();
        let explorer = Explorer::new(dir.path()).unwrap();
        let names: Vec<_> = explorer.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "Alpha", "beta"]);
        assert_eq!(explorer.selected().map(|e| e.is_parent), Some(true));
    }

    #[test]
    fn navigation_wraps_and_descends() {
        let dir = tree();
        let mut explorer = Explorer::new(dir.path()).unwrap();

        explorer.previous();
        assert_eq!(explorer.selected().unwrap().name, "beta");
        explorer.next();
        assert_eq!(explorer.selected().unwrap().name, "..");

        explorer.next();
        explorer.enter();
        assert!(explorer.current().ends_with("Alpha"));
        assert_eq!(explorer.entries().len(), 1);

        explorer.parent();
        assert_eq!(explorer.current(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn vanished_directory_keeps_position() {
        let dir = tree();
        let mut explorer = Explorer::new(dir.path()).unwrap();
        explorer.next();
        fs::remove_dir(dir.path().join("Alpha")).unwrap();

        explorer.enter();
        assert!(explorer.error().is_some());
        assert_eq!(explorer.current(), dir.path().canonicalize().unwrap());
    }
}
