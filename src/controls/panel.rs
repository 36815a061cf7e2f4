use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::controls::knob::Knob;
use crate::errors::{ApexError, Result};

/// Snapshot of knob values: group name → knob name → value.
pub type Preset = BTreeMap<String, BTreeMap<String, f32>>;

/// Named group of knobs, displayed together.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGroup {
    name: String,
    knobs: Vec<(String, Knob)>,
}

impl ControlGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            knobs: Vec::new(),
        }
    }

    /// Group of `x`, `y`, `z` knobs sharing one range.
    pub fn vec3(name: impl Into<String>, value: Vec3, min: f32, max: f32, step: f32) -> Result<Self> {
        Ok(Self::new(name)
            .with_knob("x", Knob::new("x", value.x, min, max, step)?)
            .with_knob("y", Knob::new("y", value.y, min, max, step)?)
            .with_knob("z", Knob::new("z", value.z, min, max, step)?))
    }

    /// Adds or replaces a knob.
    #[must_use]
    pub fn with_knob(mut self, key: impl Into<String>, knob: Knob) -> Self {
        let key = key.into();
        match self.knobs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = knob,
            None => self.knobs.push((key, knob)),
        }
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn knob(&self, key: &str) -> Option<&Knob> {
        self.knobs.iter().find(|(k, _)| k == key).map(|(_, knob)| knob)
    }

    fn knob_mut(&mut self, key: &str) -> Option<&mut Knob> {
        self.knobs.iter_mut().find(|(k, _)| k == key).map(|(_, knob)| knob)
    }

    pub fn knobs(&self) -> impl Iterator<Item = (&str, &Knob)> {
        self.knobs.iter().map(|(k, knob)| (k.as_str(), knob))
    }

    /// `x`/`y`/`z` knob values, if all three exist.
    #[must_use]
    pub fn as_vec3(&self) -> Option<Vec3> {
        Some(Vec3::new(
            self.knob("x")?.value,
            self.knob("y")?.value,
            self.knob("z")?.value,
        ))
    }
}

/// Registry of control groups with change tracking.
///
/// Changes accumulate until [`take_changes`](ControlPanel::take_changes)
/// drains them, in the order groups first changed.
#[derive(Debug, Default)]
pub struct ControlPanel {
    groups: Vec<ControlGroup>,
    index: FxHashMap<String, usize>,
    changed: Vec<usize>,
}

impl ControlPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, group: ControlGroup) -> Result<()> {
        if self.index.contains_key(group.name()) {
            return Err(ApexError::DuplicateControlGroup(group.name().to_string()));
        }
        self.index.insert(group.name().to_string(), self.groups.len());
        self.groups.push(group);
        Ok(())
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&ControlGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    pub fn groups(&self) -> impl Iterator<Item = &ControlGroup> {
        self.groups.iter()
    }

    #[must_use]
    pub fn get(&self, group: &str, knob: &str) -> Option<f32> {
        self.group(group)?.knob(knob).map(|k| k.value)
    }

    #[must_use]
    pub fn vec3(&self, group: &str) -> Option<Vec3> {
        self.group(group)?.as_vec3()
    }

    /// Sets one knob. Returns whether the value changed (after clamping).
    pub fn set(&mut self, group: &str, knob: &str, value: f32) -> Result<bool> {
        let &gi = self
            .index
            .get(group)
            .ok_or_else(|| ApexError::UnknownControlGroup(group.to_string()))?;

        let target = self.groups[gi]
            .knob_mut(knob)
            .ok_or_else(|| ApexError::UnknownControl {
                group: group.to_string(),
                knob: knob.to_string(),
            })?;

        let changed = target.set(value);
        if changed {
            log::debug!("control {group}.{knob} = {}", target.value);
            self.mark_changed(gi);
        }
        Ok(changed)
    }

    /// Sets `x`, `y`, `z` of a group at once.
    pub fn set_vec3(&mut self, group: &str, value: Vec3) -> Result<bool> {
        let x = self.set(group, "x", value.x)?;
        let y = self.set(group, "y", value.y)?;
        let z = self.set(group, "z", value.z)?;
        Ok(x || y || z)
    }

    fn mark_changed(&mut self, gi: usize) {
        if !self.changed.contains(&gi) {
            self.changed.push(gi);
        }
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Names of groups changed since the last call.
    pub fn take_changes(&mut self) -> Vec<String> {
        self.changed
            .drain(..)
            .map(|gi| self.groups[gi].name.clone())
            .collect()
    }

    // ========================================================================
    // Presets
    // ========================================================================

    #[must_use]
    pub fn snapshot(&self) -> Preset {
        self.groups
            .iter()
            .map(|g| {
                let knobs = g.knobs().map(|(k, knob)| (k.to_string(), knob.value)).collect();
                (g.name.clone(), knobs)
            })
            .collect()
    }

    /// Applies every value in `preset`. Unknown groups or knobs are an error
    /// and leave earlier entries applied.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<()> {
        for (group, knobs) in preset {
            for (knob, &value) in knobs {
                self.set(group, knob, value)?;
            }
        }
        Ok(())
    }

    pub fn preset_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn apply_preset_json(&mut self, json: &str) -> Result<()> {
        let preset: Preset = serde_json::from_str(json)?;
        self.apply_preset(&preset)
    }

    pub fn load_preset(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.apply_preset_json(&text)
    }
}
