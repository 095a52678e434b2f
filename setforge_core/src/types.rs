//! Core domain entities for the workout builder.
//!
//! This module defines the persisted object graph:
//! - `Workout` owns an ordered list of `Interval`s
//! - `Interval` owns an ordered list of `Exercise`s
//! - `Exercise` carries the flattened training-method record
//!
//! Equality on these types is the *identity* contract used for reactive
//! list diffing: `==` and `Hash` key on `id` alone. Full field comparison
//! is the separate `same_contents` check, and display ordering lives in
//! explicit comparator functions rather than an `Ord` impl.

use crate::expansion::Identified;
use crate::method::{CodecOptions, MethodFields, MethodKind, TrainingMethod};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Default perceived-effort rating for a new exercise (1-10 scale)
pub const DEFAULT_EFFORT: i32 = 7;

/// Default round count for a new interval
pub const DEFAULT_ROUNDS: i32 = 1;

// ============================================================================
// Value Types
// ============================================================================

/// Lifting tempo: seconds per movement phase.
///
/// A zero concentric phase means "move explosively".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tempo {
    pub eccentric: i32,
    pub pause: i32,
    pub concentric: i32,
}

impl Tempo {
    pub fn is_explosive(&self) -> bool {
        self.concentric == 0
    }
}

/// Non-owning reference to an entry in the external exercise catalog.
///
/// Many exercises may point at the same catalog entry; nothing here
/// cascades when the catalog side changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRef {
    pub id: String,
    pub name: String,
}

impl CatalogRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// Exercise
// ============================================================================

/// A single configured exercise within an interval
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub catalog_ref: CatalogRef,
    #[serde(flatten)]
    pub method_fields: MethodFields,
    pub effort: i32,
    pub weight: Option<f64>,
    pub rest_after: Option<i32>,
    pub tempo: Option<Tempo>,
    pub notes: Option<String>,
}

impl Exercise {
    /// A new exercise with baseline method fields and default effort
    pub fn new(catalog_ref: CatalogRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog_ref,
            method_fields: MethodFields::default(),
            effort: DEFAULT_EFFORT,
            weight: None,
            rest_after: None,
            tempo: None,
            notes: None,
        }
    }

    /// Reconstruct the training method from the flat fields
    pub fn method(&self) -> Result<TrainingMethod> {
        self.method_fields.decode()
    }

    /// Write a training method into the flat fields.
    ///
    /// Scalars belonging to other variants stay in the record, so a
    /// later switch back to that variant finds them again.
    pub fn set_method(&mut self, method: &TrainingMethod) {
        method.apply(&mut self.method_fields);
    }

    /// `set_method` with explicit codec behavior
    pub fn set_method_with(&mut self, method: &TrainingMethod, options: &CodecOptions) {
        method.apply_with(&mut self.method_fields, options);
    }

    /// Switch the method variant without respecifying values.
    ///
    /// Projects the requested variant out of whatever the record holds.
    pub fn set_kind(&mut self, kind: MethodKind) {
        let method = self.method_fields.construct(kind);
        method.apply(&mut self.method_fields);
    }

    /// Set the perceived-effort rating, clamped to the 1-10 scale
    pub fn set_effort(&mut self, effort: i32) {
        self.effort = effort.clamp(1, 10);
    }

    /// Field-by-field comparison (the "did anything change" check)
    pub fn same_contents(&self, other: &Self) -> bool {
        self.id == other.id
            && self.catalog_ref == other.catalog_ref
            && self.method_fields == other.method_fields
            && self.effort == other.effort
            && self.weight == other.weight
            && self.rest_after == other.rest_after
            && self.tempo == other.tempo
            && self.notes == other.notes
    }

    /// Display order: hardest first, then catalog name
    pub fn by_intensity(a: &Self, b: &Self) -> Ordering {
        b.effort
            .cmp(&a.effort)
            .then_with(|| a.catalog_ref.name.cmp(&b.catalog_ref.name))
    }
}

impl PartialEq for Exercise {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Exercise {}

impl Hash for Exercise {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identified for Exercise {
    fn identity(&self) -> Uuid {
        self.id
    }
}

// ============================================================================
// Interval
// ============================================================================

/// An ordered block of exercises repeated for a number of rounds
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub id: Uuid,
    pub name: Option<String>,
    pub exercises: Vec<Exercise>,
    pub rounds: i32,
    pub rest_between_rounds: Option<i32>,
    pub rest_after_interval: Option<i32>,
}

impl Interval {
    pub fn new(name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            exercises: Vec::new(),
            rounds: DEFAULT_ROUNDS,
            rest_between_rounds: None,
            rest_after_interval: None,
        }
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Set the round count, clamped to at least one round
    pub fn set_rounds(&mut self, rounds: i32) {
        self.rounds = rounds.max(1);
    }

    /// Append an exercise to the end of this interval
    pub fn push_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }

    /// Remove an owned exercise by identity, returning it if present
    pub fn remove_exercise(&mut self, id: Uuid) -> Option<Exercise> {
        let index = self.exercises.iter().position(|e| e.id == id)?;
        Some(self.exercises.remove(index))
    }

    /// Resolve an owned exercise by identity
    pub fn exercise(&self, id: Uuid) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn exercise_mut(&mut self, id: Uuid) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == id)
    }

    /// Field comparison; owned exercises are compared by count only
    pub fn same_contents(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.rounds == other.rounds
            && self.rest_between_rounds == other.rest_between_rounds
            && self.rest_after_interval == other.rest_after_interval
            && self.exercises.len() == other.exercises.len()
    }

    /// Display order: named intervals ascending, unnamed after any named
    /// interval, id string as the tiebreak when both are unnamed
    pub fn by_name(a: &Self, b: &Self) -> Ordering {
        match (&a.name, &b.name) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.id.to_string().cmp(&b.id.to_string()),
        }
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Interval {}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identified for Interval {
    fn identity(&self) -> Uuid {
        self.id
    }
}

// ============================================================================
// Workout
// ============================================================================

/// A complete composed workout
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub date_and_time: DateTime<Utc>,
    /// Planned duration in seconds. Set independently; never derived
    /// from the owned intervals.
    pub total_duration: i32,
    pub intervals: Vec<Interval>,
}

impl Workout {
    pub fn new(name: impl Into<String>, date_and_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date_and_time,
            total_duration: 0,
            intervals: Vec::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_date_and_time(&mut self, date_and_time: DateTime<Utc>) {
        self.date_and_time = date_and_time;
    }

    pub fn set_total_duration(&mut self, seconds: i32) {
        self.total_duration = seconds;
    }

    /// Append an interval to the end of this workout
    pub fn push_interval(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }

    /// Remove an owned interval by identity, returning it if present.
    ///
    /// The interval takes its owned exercises with it.
    pub fn remove_interval(&mut self, id: Uuid) -> Option<Interval> {
        let index = self.intervals.iter().position(|i| i.id == id)?;
        Some(self.intervals.remove(index))
    }

    /// Resolve an owned interval by identity
    pub fn interval(&self, id: Uuid) -> Option<&Interval> {
        self.intervals.iter().find(|i| i.id == id)
    }

    pub fn interval_mut(&mut self, id: Uuid) -> Option<&mut Interval> {
        self.intervals.iter_mut().find(|i| i.id == id)
    }

    /// Field comparison; owned intervals are compared by count only.
    ///
    /// Two workouts with the same interval count but different interval
    /// content still compare as same here. That is enough to answer "does
    /// this row need a redraw" and is all this check is for.
    pub fn same_contents(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.date_and_time == other.date_and_time
            && self.total_duration == other.total_duration
            && self.intervals.len() == other.intervals.len()
    }

    /// Display order: most recent first
    pub fn by_recency(a: &Self, b: &Self) -> Ordering {
        b.date_and_time.cmp(&a.date_and_time)
    }
}

impl PartialEq for Workout {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Workout {}

impl Hash for Workout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identified for Workout {
    fn identity(&self) -> Uuid {
        self.id
    }
}
