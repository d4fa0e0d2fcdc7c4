//! Recursive merge/diff over `ron::Value` maps.
//!
//! Only struct-shaped values (maps) are descended into; anything else is
//! compared and replaced as a whole.

use ron::Value;
use ron::value::Map;
use serde::Serialize;

use crate::SettingsError;

/// Round-trip a serializable value into a dynamic `ron::Value`.
pub(crate) fn to_value<T: Serialize>(value: &T) -> Result<Value, SettingsError> {
    let text = ron::to_string(value)?;
    Ok(ron::from_str(&text)?)
}

/// `base` with every key of `overlay` applied on top.
pub(crate) fn merge(base: &Map, overlay: &Map) -> Map {
    let mut out = base.clone();
    for (key, over) in overlay.iter() {
        let merged = match (base.get(key), over) {
            (Some(Value::Map(base_sub)), Value::Map(over_sub)) => {
                Value::Map(merge(base_sub, over_sub))
            }
            _ => over.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

/// Keys of `current` whose value differs from `defaults`, recursively.
pub(crate) fn diff(current: &Map, defaults: &Map) -> Map {
    let mut out = Map::new();
    for (key, value) in current.iter() {
        let changed = match (defaults.get(key), value) {
            (Some(Value::Map(def_sub)), Value::Map(cur_sub)) => {
                let sub = diff(cur_sub, def_sub);
                (!sub.is_empty()).then_some(Value::Map(sub))
            }
            (Some(default), value) if default == value => None,
            _ => Some(value.clone()),
        };
        if let Some(changed) = changed {
            out.insert(key.clone(), changed);
        }
    }
    out
}
