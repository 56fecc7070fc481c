// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::discovery::user_state_path;
use crate::errors::UserStateError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    io::{self, Write},
};
use tracing::{debug, warn};

/// Special value for `--user-state-file` and `PLAYWRIGHT_ADAPTER_USER_STATE_FILE` that disables
/// reading and writing user state.
pub const USER_STATE_NONE: &str = "none";

/// Specifies where user state is stored.
#[derive(Clone, Copy, Debug)]
pub enum UserStateLocation<'a> {
    /// The default location under the user's data directory.
    Default,

    /// No user state: loading yields an empty state and saving does nothing.
    Isolated,

    /// An explicit path. A missing file is treated as empty state.
    Explicit(&'a Utf8Path),
}

impl<'a> UserStateLocation<'a> {
    /// Creates a user state location from a CLI or environment variable value.
    ///
    /// Returns `Default` if `None`, `Isolated` if `"none"`, otherwise `Explicit` with the path.
    pub fn from_cli_or_env(s: Option<&'a str>) -> Self {
        match s {
            None => Self::Default,
            Some(s) if s == USER_STATE_NONE => Self::Isolated,
            Some(s) => Self::Explicit(Utf8Path::new(s)),
        }
    }
}

/// Per-user state, keyed by project directory.
#[derive(Clone, Debug, Default)]
pub struct UserState {
    path: Option<Utf8PathBuf>,
    data: DeserializedUserState,
}

impl UserState {
    /// Loads user state from the given location.
    pub fn load(location: UserStateLocation<'_>) -> Result<Self, UserStateError> {
        let path = match location {
            UserStateLocation::Isolated => {
                debug!("user state: skipping (isolated)");
                return Ok(Self::default());
            }
            UserStateLocation::Explicit(path) => Some(path.to_owned()),
            UserStateLocation::Default => {
                let path = user_state_path()?;
                if path.is_none() {
                    debug!("user state: could not determine data directory");
                }
                path
            }
        };

        let data = match &path {
            Some(path) => DeserializedUserState::from_path(path)?,
            None => DeserializedUserState::default(),
        };

        Ok(Self { path, data })
    }

    /// Returns the path state is saved to, if any.
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Returns the projects selected for `project_dir`, if a selection was saved.
    pub fn selected_projects(&self, project_dir: &Utf8Path) -> Option<&[String]> {
        self.data
            .projects
            .get(project_dir.as_str())
            .map(|state| state.selected.as_slice())
    }

    /// Records the projects selected for `project_dir`.
    ///
    /// The change is kept in memory until [`save`](Self::save) is called.
    pub fn set_selected_projects(&mut self, project_dir: &Utf8Path, selected: Vec<String>) {
        self.data
            .projects
            .entry(project_dir.to_string())
            .or_default()
            .selected = selected;
    }

    /// Writes the state to its file, creating parent directories as needed.
    ///
    /// Does nothing for isolated state.
    pub fn save(&self) -> Result<(), UserStateError> {
        let Some(path) = &self.path else {
            debug!("user state: not saving (no state file)");
            return Ok(());
        };

        let contents =
            toml::to_string_pretty(&self.data).map_err(|error| UserStateError::Serialize {
                path: path.clone(),
                error,
            })?;

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|error| UserStateError::CreateDir {
                dir: dir.to_owned(),
                error,
            })?;
        }

        atomicwrites::AtomicFile::new(path, atomicwrites::AllowOverwrite)
            .write(|file| file.write_all(contents.as_bytes()))
            .map_err(|error| UserStateError::Write {
                path: path.clone(),
                error,
            })?;

        debug!("user state: saved to {path}");
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedUserState {
    #[serde(default)]
    projects: BTreeMap<String, ProjectState>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ProjectState {
    #[serde(default)]
    selected: Vec<String>,
}

impl DeserializedUserState {
    fn from_path(path: &Utf8Path) -> Result<Self, UserStateError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("user state: no state file at {path}");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(UserStateError::Read {
                    path: path.to_owned(),
                    error,
                });
            }
        };

        debug!("user state: loading from {path}");
        let (state, unknown) =
            Self::deserialize_toml(&contents).map_err(|error| UserStateError::Parse {
                path: path.to_owned(),
                error,
            })?;

        if !unknown.is_empty() {
            warn!(
                "in user state file {path}, ignoring unknown keys: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            );
        }

        Ok(state)
    }

    fn deserialize_toml(contents: &str) -> Result<(Self, BTreeSet<String>), toml::de::Error> {
        let deserializer = toml::Deserializer::parse(contents)?;
        let mut unknown = BTreeSet::new();
        let state: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown.insert(path.to_string());
        })?;
        Ok((state, unknown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::tempdir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn location_from_cli_or_env() {
        assert!(matches!(
            UserStateLocation::from_cli_or_env(None),
            UserStateLocation::Default
        ));
        assert!(matches!(
            UserStateLocation::from_cli_or_env(Some("none")),
            UserStateLocation::Isolated
        ));
        assert!(matches!(
            UserStateLocation::from_cli_or_env(Some("/tmp/state.toml")),
            UserStateLocation::Explicit(path) if path == "/tmp/state.toml"
        ));
    }

    #[test]
    fn missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.toml");

        let state = UserState::load(UserStateLocation::Explicit(&path)).expect("loads");
        assert_eq!(state.path(), Some(path.as_path()));
        assert_eq!(state.selected_projects(Utf8Path::new("/proj")), None);
    }

    #[test]
    fn save_then_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/dir/state.toml");
        let project_dir = Utf8Path::new("/home/user/my app");

        let mut state = UserState::load(UserStateLocation::Explicit(&path)).expect("loads");
        state.set_selected_projects(project_dir, vec!["chromium".to_owned(), "webkit".to_owned()]);
        state.save().expect("saves, creating parent directories");

        let state = UserState::load(UserStateLocation::Explicit(&path)).expect("loads");
        assert_eq!(
            state.selected_projects(project_dir),
            Some(["chromium".to_owned(), "webkit".to_owned()].as_slice())
        );
        assert_eq!(state.selected_projects(Utf8Path::new("/other")), None);
    }

    #[test]
    fn selection_is_replaced() {
        let mut state = UserState::default();
        let project_dir = Utf8Path::new("/proj");

        state.set_selected_projects(project_dir, vec!["chromium".to_owned()]);
        state.set_selected_projects(project_dir, vec![]);
        assert_eq!(state.selected_projects(project_dir), Some([].as_slice()));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.toml");
        std::fs::write(
            &path,
            indoc! {r#"
                version = 2

                [projects."/proj"]
                selected = ["firefox"]
                pinned = true
            "#},
        )
        .unwrap();

        let state = UserState::load(UserStateLocation::Explicit(&path)).expect("loads");
        assert_eq!(
            state.selected_projects(Utf8Path::new("/proj")),
            Some(["firefox".to_owned()].as_slice())
        );
    }

    #[test]
    fn invalid_state_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.toml");
        std::fs::write(&path, "projects = 1").unwrap();

        let error = UserState::load(UserStateLocation::Explicit(&path)).expect_err("invalid");
        assert!(
            matches!(error, UserStateError::Parse { .. }),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn isolated_state_does_not_save() {
        let mut state = UserState::load(UserStateLocation::Isolated).expect("loads");
        state.set_selected_projects(Utf8Path::new("/proj"), vec!["chromium".to_owned()]);
        state.save().expect("saving isolated state is a no-op");
        assert_eq!(state.path(), None);
    }
}
