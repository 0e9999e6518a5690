//! Project file format
//!
//! The project is a pretty-printed JSON object with fixed key names.
//! Integer fields accept any JSON number and are rounded, unknown keys are
//! ignored and missing keys take their defaults.

use crate::message::TaskId;
use crate::task::Task;
use egui::{pos2, vec2, Rect};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectFileError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, ProjectFileError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDocument {
    #[serde(rename = "GridSize", deserialize_with = "number_as_int")]
    pub grid_size: i32,
    #[serde(rename = "Pan.X")]
    pub pan_x: f32,
    #[serde(rename = "Pan.Y")]
    pub pan_y: f32,
    #[serde(rename = "ZoomLevel", deserialize_with = "number_as_int")]
    pub zoom_level: i32,
    #[serde(rename = "TimeScaleRate", deserialize_with = "number_as_int")]
    pub time_scale_rate: i32,
    #[serde(rename = "Tasks")]
    pub tasks: Vec<TaskDocument>,
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self {
            grid_size: 16,
            pan_x: 0.0,
            pan_y: 0.0,
            zoom_level: crate::camera::FIRST_RUN_ZOOM_LEVEL,
            time_scale_rate: 0,
            tasks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDocument {
    #[serde(rename = "Position.X")]
    pub position_x: f32,
    #[serde(rename = "Position.Y")]
    pub position_y: f32,
    #[serde(rename = "Rect.W")]
    pub rect_w: f32,
    #[serde(rename = "Rect.H")]
    pub rect_h: f32,
    #[serde(rename = "ImageDisplaySize.X")]
    pub image_display_size_x: f32,
    #[serde(rename = "ImageDisplaySize.Y")]
    pub image_display_size_y: f32,
    #[serde(rename = "Checkbox.Checked")]
    pub checked: bool,
    #[serde(rename = "Progressbar.Percentage", deserialize_with = "number_as_int")]
    pub percentage: i32,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ImagePath")]
    pub image_path: String,
    #[serde(rename = "Selected")]
    pub selected: bool,
    #[serde(rename = "TaskType.CurrentChoice", deserialize_with = "number_as_int")]
    pub task_type: i32,
}

impl TaskDocument {
    pub fn from_task(task: &Task) -> Self {
        Self {
            position_x: task.position.x,
            position_y: task.position.y,
            rect_w: task.rect.width(),
            rect_h: task.rect.height(),
            image_display_size_x: task.image_display_size.x,
            image_display_size_y: task.image_display_size.y,
            checked: task.completion_checkbox.checked,
            percentage: task.completion_progress.percentage,
            description: task.description.text.clone(),
            image_path: task.image_path.clone(),
            selected: task.selected,
            task_type: task.task_type.current as i32,
        }
    }

    /// Rebuild a task. The texture is not loaded until the task sees a
    /// `TaskClose`; the stored display size survives that reload.
    pub fn into_task(self, id: TaskId) -> Task {
        let position = pos2(self.position_x, self.position_y);
        let mut task = Task::new(id, position);
        let size = vec2(self.rect_w, self.rect_h).max(task.min_size);
        task.rect = Rect::from_min_size(position, size);
        task.image_display_size = vec2(self.image_display_size_x, self.image_display_size_y);
        task.completion_checkbox.checked = self.checked;
        task.completion_progress.set(self.percentage);
        task.description.text = self.description;
        task.prev_image_path = self.image_path.clone();
        task.image_path = self.image_path;
        task.selected = self.selected;
        task.task_type.set_current(self.task_type.max(0) as usize);
        task
    }
}

/// Integers may be written as any JSON number.
fn number_as_int<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value.abs() > i32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("{} is not a valid integer", value)));
    }
    Ok(value.round() as i32)
}

pub fn save(doc: &ProjectDocument, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writer.flush()?;
    Ok(())
}

pub fn load(path: &Path) -> Result<ProjectDocument> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Receives every document the project saves. Nothing is replayed from it;
/// it is the hook an undo stack would hang off.
pub trait History {
    fn record(&mut self, doc: &ProjectDocument);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("masterplan-doc-{}-{}.mstr", name, std::process::id()))
    }

    fn sample() -> ProjectDocument {
        ProjectDocument {
            grid_size: 16,
            pan_x: 12.5,
            pan_y: -40.0,
            zoom_level: 2,
            time_scale_rate: 1,
            tasks: vec![TaskDocument {
                position_x: 32.0,
                position_y: 48.0,
                rect_w: 64.0,
                rect_h: 16.0,
                checked: true,
                percentage: 35,
                description: "Ship it\nthen rest".into(),
                image_path: "pics/a.png".into(),
                selected: true,
                task_type: 1,
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("round-trip");
        let doc = sample();
        save(&doc, &path).unwrap();
        assert_eq!(load(&path).unwrap(), doc);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_key_names_are_stable() {
        let json = serde_json::to_value(sample()).unwrap();
        for key in ["GridSize", "Pan.X", "Pan.Y", "ZoomLevel", "TimeScaleRate", "Tasks"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        let task = &json["Tasks"][0];
        for key in [
            "Position.X",
            "Position.Y",
            "Rect.W",
            "Rect.H",
            "ImageDisplaySize.X",
            "ImageDisplaySize.Y",
            "Checkbox.Checked",
            "Progressbar.Percentage",
            "Description",
            "ImagePath",
            "Selected",
            "TaskType.CurrentChoice",
        ] {
            assert!(task.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_numbers_and_defaults() {
        let doc: ProjectDocument = serde_json::from_str(
            r#"{"GridSize": 32.0, "ZoomLevel": 0.9, "Extra": "ignored",
                "Tasks": [{"Progressbar.Percentage": 40.0, "TaskType.CurrentChoice": 2}]}"#,
        )
        .unwrap();
        assert_eq!(doc.grid_size, 32);
        assert_eq!(doc.zoom_level, 1);
        assert_eq!(doc.time_scale_rate, 0);
        assert_eq!((doc.pan_x, doc.pan_y), (0.0, 0.0));
        assert_eq!(doc.tasks[0].percentage, 40);
        assert_eq!(doc.tasks[0].task_type, 2);
        assert!(doc.tasks[0].description.is_empty());
    }

    #[test]
    fn test_empty_object_is_first_run() {
        let doc: ProjectDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, ProjectDocument::default());
        assert_eq!(doc.zoom_level, crate::camera::FIRST_RUN_ZOOM_LEVEL);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(serde_json::from_str::<ProjectDocument>(r#"{"GridSize": "big"}"#).is_err());
        assert!(serde_json::from_str::<ProjectDocument>(r#"{"ZoomLevel": 1e40}"#).is_err());
    }

    #[test]
    fn test_errors() {
        let missing = load(&temp_path("never-written")).unwrap_err();
        assert!(missing.is_not_found());

        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        let corrupt = load(&path).unwrap_err();
        assert!(matches!(corrupt, ProjectFileError::Json(_)));
        assert!(!corrupt.is_not_found());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_task_conversion() {
        let doc = sample().tasks.remove(0);
        let task = doc.clone().into_task(9);
        assert_eq!(task.id, 9);
        assert_eq!(task.position, pos2(32.0, 48.0));
        assert_eq!(task.rect, Rect::from_min_size(pos2(32.0, 48.0), vec2(64.0, 16.0)));
        assert_eq!(task.task_type.current, 1);
        assert_eq!(task.prev_image_path, "pics/a.png");
        assert_eq!(TaskDocument::from_task(&task), doc);
    }
}
