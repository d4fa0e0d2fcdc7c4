use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use ron::Value;
use ron::value::Map;

use crate::delta::{diff, merge, to_value};
use crate::{Settings, SettingsError};

type Deltas = BTreeMap<String, Value>;

struct Section {
    defaults: Map,
    effective: Map,
}

/// Builder for [`SettingsStore`].
#[derive(Debug, Default)]
pub struct SettingsStoreBuilder {
    settings_file: Option<PathBuf>,
}

impl SettingsStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back the store with a RON delta file. Without one the store is
    /// memory-only and `update` never touches disk.
    pub fn with_settings_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    pub fn build(self) -> Result<SettingsStore, SettingsError> {
        let deltas = match &self.settings_file {
            Some(path) => {
                if let Some(dir) = path.parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        fs::create_dir_all(dir)?;
                    }
                }
                read_deltas(path)?
            }
            None => Deltas::new(),
        };

        Ok(SettingsStore {
            file_path: self.settings_file,
            deltas: RwLock::new(deltas),
            sections: RwLock::new(BTreeMap::new()),
        })
    }
}

/// Sectioned settings with a delta file.
///
/// Every registered type owns one top-level section. Reads merge the type's
/// defaults with whatever the file overrides; writes persist only the fields
/// that differ from the defaults.
pub struct SettingsStore {
    file_path: Option<PathBuf>,
    deltas: RwLock<Deltas>,
    sections: RwLock<BTreeMap<&'static str, Section>>,
}

impl SettingsStore {
    pub fn builder() -> SettingsStoreBuilder {
        SettingsStoreBuilder::new()
    }

    /// A store that never reads or writes a file.
    pub fn in_memory() -> Self {
        Self {
            file_path: None,
            deltas: RwLock::new(Deltas::new()),
            sections: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Register `T`, applying any override already present in the file.
    pub fn register<T: Settings>(&self) -> Result<(), SettingsError> {
        let mut sections = self.sections_write()?;
        if sections.contains_key(T::SECTION) {
            return Err(SettingsError::AlreadyRegistered(T::SECTION));
        }

        let defaults = section_map::<T>(to_value(&T::default())?)?;
        let effective = match self.deltas_read()?.get(T::SECTION) {
            Some(Value::Map(overlay)) => merge(&defaults, overlay),
            _ => defaults.clone(),
        };
        sections.insert(
            T::SECTION,
            Section {
                defaults,
                effective,
            },
        );
        Ok(())
    }

    /// Current effective value of `T`.
    pub fn get<T: Settings>(&self) -> Result<T, SettingsError> {
        let sections = self.sections_read()?;
        let section = sections
            .get(T::SECTION)
            .ok_or(SettingsError::NotRegistered(T::SECTION))?;
        Ok(Value::Map(section.effective.clone()).into_rust()?)
    }

    /// Mutate `T` in place and persist the resulting delta.
    pub fn update<T, F>(&self, mutate: F) -> Result<(), SettingsError>
    where
        T: Settings,
        F: FnOnce(&mut T),
    {
        let mut value = self.get::<T>()?;
        mutate(&mut value);
        let effective = section_map::<T>(to_value(&value)?)?;

        let delta = {
            let mut sections = self.sections_write()?;
            let section = sections
                .get_mut(T::SECTION)
                .ok_or(SettingsError::NotRegistered(T::SECTION))?;
            let delta = diff(&effective, &section.defaults);
            section.effective = effective;
            delta
        };

        {
            let mut deltas = self.deltas_write()?;
            if delta.is_empty() {
                deltas.remove(T::SECTION);
            } else {
                deltas.insert(T::SECTION.to_string(), Value::Map(delta));
            }
        }

        self.persist()
    }

    /// Re-read the delta file and re-merge every registered section.
    pub fn reload(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        let fresh = read_deltas(path)?;

        let mut sections = self.sections_write()?;
        for (name, section) in sections.iter_mut() {
            section.effective = match fresh.get(*name) {
                Some(Value::Map(overlay)) => merge(&section.defaults, overlay),
                _ => section.defaults.clone(),
            };
        }
        *self.deltas_write()? = fresh;
        Ok(())
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        let text = {
            let deltas = self.deltas_read()?;
            ron::ser::to_string_pretty(&*deltas, ron::ser::PrettyConfig::default())?
        };
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn deltas_read(&self) -> Result<RwLockReadGuard<'_, Deltas>, SettingsError> {
        self.deltas.read().map_err(|_| SettingsError::Poisoned)
    }

    fn deltas_write(&self) -> Result<RwLockWriteGuard<'_, Deltas>, SettingsError> {
        self.deltas.write().map_err(|_| SettingsError::Poisoned)
    }

    fn sections_read(
        &self,
    ) -> Result<RwLockReadGuard<'_, BTreeMap<&'static str, Section>>, SettingsError> {
        self.sections.read().map_err(|_| SettingsError::Poisoned)
    }

    fn sections_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<&'static str, Section>>, SettingsError> {
        self.sections.write().map_err(|_| SettingsError::Poisoned)
    }
}

fn section_map<T: Settings>(value: Value) -> Result<Map, SettingsError> {
    match value {
        Value::Map(map) => Ok(map),
        _ => Err(SettingsError::NotAStruct(T::SECTION)),
    }
}

fn read_deltas(path: &Path) -> Result<Deltas, SettingsError> {
    if !path.exists() {
        return Ok(Deltas::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Deltas::new());
    }
    Ok(ron::from_str(&content)?)
}
