//! Workout persistence and retrieval.
//!
//! The store keeps the full workout graph in memory and persists it as
//! JSONL (one workout per line) with file locking. Mutations are visible
//! to callers only through `fetch_all`/lookup copies; nothing reaches
//! disk until an explicit `save`.
//!
//! Load failures are logged and yield an empty store rather than an
//! error; save failures are surfaced as typed errors. A corrupt line in
//! the data file loses that one workout, not the file.

use crate::{Error, Exercise, Interval, Result, Workout};
use fs2::FileExt;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// In-memory workout graph bound to a data file
#[derive(Debug)]
pub struct WorkoutStore {
    path: PathBuf,
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    /// Open a store backed by the given file.
    ///
    /// A missing file yields an empty store. So does an unreadable one:
    /// load failures are logged at warn and never surfaced, matching the
    /// read path the presentation layer was built against.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let workouts = load_workouts(&path);
        Self { path, workouts }
    }

    /// The data file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// All workouts, sorted by the given comparator.
    ///
    /// Returns copies; the store's own graph is never handed out
    /// mutably.
    pub fn fetch_all(
        &self,
        mut comparator: impl FnMut(&Workout, &Workout) -> Ordering,
    ) -> Vec<Workout> {
        let mut workouts = self.workouts.clone();
        workouts.sort_by(&mut comparator);
        workouts
    }

    /// Resolve a workout by identity
    pub fn get(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Resolve an interval by identity, wherever it is owned
    pub fn interval(&self, id: Uuid) -> Option<&Interval> {
        self.workouts.iter().find_map(|w| w.interval(id))
    }

    /// Resolve an exercise by identity, wherever it is owned
    pub fn exercise(&self, id: Uuid) -> Option<&Exercise> {
        self.workouts
            .iter()
            .flat_map(|w| w.intervals.iter())
            .find_map(|i| i.exercise(id))
    }

    /// Commit a workout into the in-memory graph.
    ///
    /// A workout with a known id replaces the stored one (the commit of
    /// an edited copy); a new id is appended.
    pub fn insert(&mut self, workout: Workout) {
        match self.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(slot) => {
                tracing::debug!("Replacing workout {}", workout.id);
                *slot = workout;
            }
            None => {
                tracing::debug!("Inserting workout {}", workout.id);
                self.workouts.push(workout);
            }
        }
    }

    /// Replace an existing workout by identity
    pub fn update(&mut self, workout: Workout) -> Result<()> {
        match self.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(slot) => {
                *slot = workout;
                Ok(())
            }
            None => Err(Error::Store(format!("unknown workout id {}", workout.id))),
        }
    }

    /// Delete a workout and its full owned subtree in one operation.
    ///
    /// Afterwards neither the workout nor any interval or exercise it
    /// owned is reachable through any lookup on this store.
    pub fn delete(&mut self, id: Uuid) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.id == id)?;
        let removed = self.workouts.remove(index);
        tracing::info!(
            "Deleted workout {} ({} intervals cascaded)",
            removed.id,
            removed.intervals.len()
        );
        Some(removed)
    }

    /// Persist the in-memory graph, blocking until it is on disk.
    ///
    /// Atomically writes by:
    /// 1. Writing all workouts to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the data file
    ///
    /// A failed save leaves the in-memory graph untouched and is not
    /// retried.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
        })?)?;

        // Exclusive lock on the temp file serializes a second process
        // instance writing the same store
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for workout in &self.workouts {
                let line = serde_json::to_string(workout)?;
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} workouts to {:?}", self.workouts.len(), self.path);
        Ok(())
    }
}

/// Read the workout graph from a JSONL file.
///
/// Every failure mode short of a corrupt line degrades to an empty
/// store with a warn log; a corrupt line is skipped and the rest of the
/// file still loads.
fn load_workouts(path: &Path) -> Vec<Workout> {
    if !path.exists() {
        tracing::info!("No store file found at {:?}, starting empty", path);
        return Vec::new();
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Unable to open store file {:?}: {}. Starting empty.", path, e);
            return Vec::new();
        }
    };

    if let Err(e) = file.lock_shared() {
        tracing::warn!("Unable to lock store file {:?}: {}. Starting empty.", path, e);
        return Vec::new();
    }

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    if let Err(e) = reader.read_to_string(&mut contents) {
        let _ = file.unlock();
        tracing::warn!("Failed to read store file {:?}: {}. Starting empty.", path, e);
        return Vec::new();
    }

    if let Err(e) = file.unlock() {
        tracing::warn!("Failed to unlock store file {:?}: {}", path, e);
    }

    let mut workouts = Vec::new();
    for (line_num, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Workout>(line) {
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!("Failed to parse workout at line {}: {}", line_num + 1, e);
            }
        }
    }

    tracing::debug!("Loaded {} workouts from {:?}", workouts.len(), path);
    workouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::TrainingMethod;
    use crate::types::CatalogRef;
    use chrono::{TimeZone, Utc};

    fn build_workout(name: &str, day: u32) -> Workout {
        let mut exercise = Exercise::new(CatalogRef::new("back_squat", "Back Squat"));
        exercise.set_method(&TrainingMethod::Standard {
            min_reps: 5,
            max_reps: 8,
        });
        exercise.set_effort(8);

        let mut interval = Interval::new(Some("Main Block".into()));
        interval.set_rounds(3);
        interval.push_exercise(exercise);

        let mut workout =
            Workout::new(name, Utc.with_ymd_and_hms(2024, 1, day, 18, 0, 0).unwrap());
        workout.set_total_duration(3600);
        workout.push_interval(interval);
        workout
    }

    #[test]
    fn test_open_nonexistent_starts_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = WorkoutStore::open(temp_dir.path().join("nonexistent.jsonl"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_reopen_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store_path = temp_dir.path().join("workouts.jsonl");

        let workout = build_workout("Leg Day", 5);
        let workout_id = workout.id;
        let exercise_id = workout.intervals[0].exercises[0].id;

        let mut store = WorkoutStore::open(&store_path);
        store.insert(workout);
        store.save().unwrap();

        let reopened = WorkoutStore::open(&store_path);
        assert_eq!(reopened.len(), 1);

        let loaded = reopened.get(workout_id).unwrap();
        assert_eq!(loaded.name, "Leg Day");
        assert_eq!(loaded.total_duration, 3600);
        assert_eq!(loaded.intervals[0].rounds, 3);

        let exercise = reopened.exercise(exercise_id).unwrap();
        assert_eq!(
            exercise.method().unwrap(),
            TrainingMethod::Standard {
                min_reps: 5,
                max_reps: 8,
            }
        );
    }

    #[test]
    fn test_delete_cascades_to_owned_subtree() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store_path = temp_dir.path().join("workouts.jsonl");

        let workout = build_workout("Leg Day", 5);
        let workout_id = workout.id;
        let interval_id = workout.intervals[0].id;
        let exercise_id = workout.intervals[0].exercises[0].id;

        let mut store = WorkoutStore::open(&store_path);
        store.insert(workout);
        assert!(store.interval(interval_id).is_some());
        assert!(store.exercise(exercise_id).is_some());

        store.delete(workout_id).unwrap();

        assert!(store.get(workout_id).is_none());
        assert!(store.interval(interval_id).is_none());
        assert!(store.exercise(exercise_id).is_none());
        assert!(store.fetch_all(Workout::by_recency).is_empty());

        // Still gone after a round trip through disk
        store.save().unwrap();
        let reopened = WorkoutStore::open(&store_path);
        assert!(reopened.get(workout_id).is_none());
    }

    #[test]
    fn test_fetch_all_applies_comparator() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = WorkoutStore::open(temp_dir.path().join("workouts.jsonl"));

        store.insert(build_workout("Jan 2", 2));
        store.insert(build_workout("Jan 5", 5));
        store.insert(build_workout("Jan 1", 1));

        let sorted = store.fetch_all(Workout::by_recency);
        let names: Vec<_> = sorted.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Jan 5", "Jan 2", "Jan 1"]);
    }

    #[test]
    fn test_insert_with_known_id_commits_edited_copy() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = WorkoutStore::open(temp_dir.path().join("workouts.jsonl"));

        let workout = build_workout("Leg Day", 5);
        let workout_id = workout.id;
        store.insert(workout);

        let mut edited = store.get(workout_id).unwrap().clone();
        edited.set_name("Heavy Leg Day");
        store.insert(edited);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(workout_id).unwrap().name, "Heavy Leg Day");
    }

    #[test]
    fn test_update_unknown_id_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = WorkoutStore::open(temp_dir.path().join("workouts.jsonl"));

        let result = store.update(build_workout("Leg Day", 5));
        assert!(matches!(result, Err(Error::Store(_))));
    }

    #[test]
    fn test_corrupt_line_loses_one_workout_not_the_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store_path = temp_dir.path().join("workouts.jsonl");

        let mut store = WorkoutStore::open(&store_path);
        store.insert(build_workout("Keep Me", 5));
        store.save().unwrap();

        // Corrupt the file with a garbage line between valid ones
        let mut contents = std::fs::read_to_string(&store_path).unwrap();
        contents.push_str("{ not a workout }\n");
        contents.push_str(
            &serde_json::to_string(&build_workout("Also Keep Me", 6)).unwrap(),
        );
        contents.push('\n');
        std::fs::write(&store_path, contents).unwrap();

        let reopened = WorkoutStore::open(&store_path);
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_unknown_discriminator_survives_load_and_fails_at_decode() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store_path = temp_dir.path().join("workouts.jsonl");

        let mut workout = build_workout("Leg Day", 5);
        let exercise_id = workout.intervals[0].exercises[0].id;
        workout.intervals[0].exercises[0].method_fields.method_type = "bogus".into();

        let mut store = WorkoutStore::open(&store_path);
        store.insert(workout);
        store.save().unwrap();

        // The workout still loads; only the one reconstruction fails
        let reopened = WorkoutStore::open(&store_path);
        assert_eq!(reopened.len(), 1);
        let exercise = reopened.exercise(exercise_id).unwrap();
        assert!(matches!(
            exercise.method(),
            Err(Error::CorruptEncoding(_))
        ));
    }

    #[test]
    fn test_atomic_save_leaves_no_stray_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store_path = temp_dir.path().join("workouts.jsonl");

        let mut store = WorkoutStore::open(&store_path);
        store.insert(build_workout("Leg Day", 5));
        store.save().unwrap();

        assert!(store_path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "workouts.jsonl")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only workouts.jsonl, found extras: {:?}",
            extras
        );
    }
}
