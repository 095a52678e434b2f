//! Training method configuration and its flat storage encoding.
//!
//! A `TrainingMethod` is a sum type, but the storage layer can only hold
//! flat scalar columns. The bridge is `MethodFields`: a discriminator
//! string plus four always-present scalars. Encoding writes only the
//! active variant's fields; decoding projects only the fields the stored
//! discriminator calls for. Everything here is a pure value transform.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Baseline scalars for a record that has never been encoded.
///
/// A fresh record decodes to `Standard { min_reps: 10, max_reps: 10 }`.
pub const DEFAULT_MIN_REPS: i32 = 10;
pub const DEFAULT_MAX_REPS: i32 = 10;
pub const DEFAULT_TARGET_TOTAL: i32 = 0;
pub const DEFAULT_SECONDS: i32 = 30;

/// Mini-set rep bounds used when a rest-pause method is created fresh.
pub const REST_PAUSE_DEFAULT_MIN_REPS: i32 = 5;
pub const REST_PAUSE_DEFAULT_MAX_REPS: i32 = 10;

/// How an exercise is performed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrainingMethod {
    /// Straight sets within a rep range
    Standard { min_reps: i32, max_reps: i32 },
    /// Accumulate a total rep count across short mini-sets
    RestPause {
        target_total: i32,
        min_reps: i32,
        max_reps: i32,
    },
    /// Work for a fixed duration
    Timed { seconds: i32 },
}

/// Discriminator for the stored method variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Standard,
    RestPause,
    Timed,
}

impl MethodKind {
    /// The exact string written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Standard => "standard",
            MethodKind::RestPause => "restPause",
            MethodKind::Timed => "timed",
        }
    }

    /// Parse a stored discriminator string
    ///
    /// Anything unrecognized is treated as storage corruption.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(MethodKind::Standard),
            "restPause" => Ok(MethodKind::RestPause),
            "timed" => Ok(MethodKind::Timed),
            other => Err(Error::CorruptEncoding(other.to_string())),
        }
    }
}

/// Codec behavior switches
#[derive(Clone, Copy, Debug, Default)]
pub struct CodecOptions {
    /// Reset fields the active variant does not use back to the baseline
    /// on every encode.
    ///
    /// Off by default: the form UI relies on stale fields surviving a
    /// variant switch so a user's last-entered values reappear when they
    /// switch back.
    pub clear_inactive_fields: bool,
}

/// The flat record the storage layer actually holds.
///
/// All four scalars are always present; which ones are meaningful depends
/// on `method_type`. An unrecognized `method_type` survives load/save as
/// an opaque string and only fails at `decode`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MethodFields {
    pub method_type: String,
    pub min_reps: i32,
    pub max_reps: i32,
    pub target_total: i32,
    pub seconds: i32,
}

impl Default for MethodFields {
    fn default() -> Self {
        Self {
            method_type: MethodKind::Standard.as_str().to_string(),
            min_reps: DEFAULT_MIN_REPS,
            max_reps: DEFAULT_MAX_REPS,
            target_total: DEFAULT_TARGET_TOTAL,
            seconds: DEFAULT_SECONDS,
        }
    }
}

impl TrainingMethod {
    /// A rest-pause method with the default mini-set bounds
    pub fn rest_pause(target_total: i32) -> Self {
        TrainingMethod::RestPause {
            target_total,
            min_reps: REST_PAUSE_DEFAULT_MIN_REPS,
            max_reps: REST_PAUSE_DEFAULT_MAX_REPS,
        }
    }

    /// Which variant this value is
    pub fn kind(&self) -> MethodKind {
        match self {
            TrainingMethod::Standard { .. } => MethodKind::Standard,
            TrainingMethod::RestPause { .. } => MethodKind::RestPause,
            TrainingMethod::Timed { .. } => MethodKind::Timed,
        }
    }

    /// Write this method into an existing flat record.
    ///
    /// Sets the discriminator and the active variant's scalars. Fields
    /// belonging to other variants are left exactly as the record held
    /// them, so a value entered under one method is still there when the
    /// user switches back to it.
    pub fn apply(&self, fields: &mut MethodFields) {
        self.apply_with(fields, &CodecOptions::default())
    }

    /// `apply` with explicit codec behavior.
    ///
    /// With `clear_inactive_fields` set, the inactive scalars are reset
    /// to the fresh-record baseline before the active ones are written.
    pub fn apply_with(&self, fields: &mut MethodFields, options: &CodecOptions) {
        if options.clear_inactive_fields {
            *fields = MethodFields::default();
        }
        fields.method_type = self.kind().as_str().to_string();

        match *self {
            TrainingMethod::Standard { min_reps, max_reps } => {
                fields.min_reps = min_reps;
                fields.max_reps = max_reps;
            }
            TrainingMethod::RestPause {
                target_total,
                min_reps,
                max_reps,
            } => {
                fields.target_total = target_total;
                fields.min_reps = min_reps;
                fields.max_reps = max_reps;
            }
            TrainingMethod::Timed { seconds } => {
                fields.seconds = seconds;
            }
        }
    }

    /// Encode into a fresh record (baseline scalars plus this method)
    pub fn encode(&self) -> MethodFields {
        let mut fields = MethodFields::default();
        self.apply(&mut fields);
        fields
    }
}

impl MethodFields {
    /// Parse the stored discriminator
    pub fn kind(&self) -> Result<MethodKind> {
        MethodKind::parse(&self.method_type)
    }

    /// Reconstruct the method this record encodes.
    ///
    /// Reads the discriminator and projects out only the fields that
    /// variant uses; the rest are ignored. Fails only on an unrecognized
    /// discriminator.
    pub fn decode(&self) -> Result<TrainingMethod> {
        Ok(self.construct(self.kind()?))
    }

    /// Project a specific variant out of this record, ignoring the
    /// stored discriminator.
    ///
    /// This is the variant-switch path: the UI picks a new kind without
    /// respecifying values, and whatever the record holds for that
    /// variant's fields is what comes back.
    pub fn construct(&self, kind: MethodKind) -> TrainingMethod {
        match kind {
            MethodKind::Standard => TrainingMethod::Standard {
                min_reps: self.min_reps,
                max_reps: self.max_reps,
            },
            MethodKind::RestPause => TrainingMethod::RestPause {
                target_total: self.target_total,
                min_reps: self.min_reps,
                max_reps: self.max_reps,
            },
            MethodKind::Timed => TrainingMethod::Timed {
                seconds: self.seconds,
            },
        }
    }
}
