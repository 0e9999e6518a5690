//! The board
//!
//! `Project` owns the task list and everything that coordinates tasks:
//! the camera, click arbitration, the rubber band, the context menu, the
//! clipboard, keyboard shortcuts, file drops, the time-scale ruler, the
//! status bar and persistence.
//!
//! A frame is driven in three calls: [`Project::update`], then
//! [`Project::draw_world`], then [`Project::draw_gui`].

use crate::camera::{
    step_zoom_level, zoom_level_from_stored, Camera, DEFAULT_ZOOM_LEVEL, FIRST_RUN_ZOOM_LEVEL, ZOOM_LEVELS,
};
use crate::document::{self, History, ProjectDocument, TaskDocument};
use crate::message::{Message, TaskId};
use crate::platform::Platform;
use crate::task::{Task, TaskFrame, TaskType};
use crate::timescale::{self, TimeScaleRate};
use egui::{pos2, vec2, Key, Painter, Pos2, Rect, Stroke, Vec2};
use plancore::animation::{ease_toward, EASE_RATE};
use plancore::safety::catch_or;
use plancore::theme::PlanColors;
use plancore::widgets::{button, draw_text};
use plancore::{snap_to_grid, FrameInput};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

pub const DEFAULT_GRID_SIZE: f32 = 16.0;

/// A second press on the same task within this many frames is a double click.
pub const DOUBLE_CLICK_FRAMES: i32 = 10;

/// Size of one context menu entry.
pub const MENU_ENTRY_SIZE: Vec2 = Vec2::new(128.0, 24.0);

/// Height of the status bar at the bottom of the screen.
pub const STATUS_BAR_HEIGHT: f32 = 16.0;

pub struct Project {
    pub file_path: PathBuf,
    pub grid_size: f32,
    pub zoom_level: usize,
    /// Live zoom, easing toward the current zoom level.
    pub zoom: f32,
    pub pan: Vec2,
    pub time_scale_rate: TimeScaleRate,
    pub tasks: Vec<Task>,
    /// Some task's editor is open.
    pub task_open: bool,
    context_menu_open: bool,
    context_menu_position: Pos2,
    selecting: bool,
    selection_start: Pos2,
    /// Frames since the last left press, -1 when disarmed.
    double_click_timer: i32,
    double_click_task: Option<TaskId>,
    /// Copied task ids, each with a fallback clone in case the task is
    /// deleted before the paste.
    copy_buffer: Vec<(TaskId, Task)>,
    camera: Camera,
    next_id: TaskId,
    history: Option<Box<dyn History>>,
}

impl Project {
    pub fn new(file_path: PathBuf) -> Self {
        let zoom = ZOOM_LEVELS[DEFAULT_ZOOM_LEVEL];
        Self {
            file_path,
            grid_size: DEFAULT_GRID_SIZE,
            zoom_level: DEFAULT_ZOOM_LEVEL,
            zoom,
            pan: Vec2::ZERO,
            time_scale_rate: TimeScaleRate::Off,
            tasks: Vec::new(),
            task_open: false,
            context_menu_open: false,
            context_menu_position: Pos2::ZERO,
            selecting: false,
            selection_start: Pos2::ZERO,
            double_click_timer: -1,
            double_click_task: None,
            copy_buffer: Vec::new(),
            camera: Camera::new(Vec2::ZERO, zoom, vec2(960.0, 540.0)),
            next_id: 0,
            history: None,
        }
    }

    /// Load the project at `file_path`. A missing or unreadable file gives
    /// an empty board.
    pub fn load(file_path: PathBuf, platform: &mut dyn Platform) -> Self {
        match document::load(&file_path) {
            Ok(doc) => {
                log::info!("loaded {} tasks from {}", doc.tasks.len(), file_path.display());
                Self::from_document(doc, file_path, platform)
            }
            Err(e) if e.is_not_found() => {
                log::info!("no project at {}, starting empty", file_path.display());
                Self::new(file_path)
            }
            Err(e) => {
                log::error!("could not load project {}: {}", file_path.display(), e);
                Self::new(file_path)
            }
        }
    }

    pub fn from_document(doc: ProjectDocument, file_path: PathBuf, platform: &mut dyn Platform) -> Self {
        let mut project = Self::new(file_path);
        if doc.grid_size > 0 {
            project.grid_size = doc.grid_size as f32;
        }
        project.pan = vec2(doc.pan_x, doc.pan_y);
        if doc.zoom_level == FIRST_RUN_ZOOM_LEVEL {
            log::info!("first run, zoom level {}", DEFAULT_ZOOM_LEVEL);
        }
        project.zoom_level = zoom_level_from_stored(doc.zoom_level);
        project.time_scale_rate = TimeScaleRate::from_index(doc.time_scale_rate);

        for task_doc in doc.tasks {
            let id = project.allocate_id();
            project.tasks.push(task_doc.into_task(id));
        }
        let ids: Vec<TaskId> = project.tasks.iter().map(|t| t.id).collect();
        for id in ids {
            project.broadcast(Message::TaskClose { task: id }, platform);
        }
        project
    }

    pub fn to_document(&self) -> ProjectDocument {
        ProjectDocument {
            grid_size: self.grid_size.round() as i32,
            pan_x: self.pan.x,
            pan_y: self.pan.y,
            zoom_level: self.zoom_level as i32,
            time_scale_rate: self.time_scale_rate.index(),
            tasks: self.tasks.iter().map(TaskDocument::from_task).collect(),
        }
    }

    /// Write the project file. Failures are logged and otherwise ignored.
    pub fn save(&mut self) {
        let doc = self.to_document();
        if let Err(e) = document::save(&doc, &self.file_path) {
            log::error!("could not save project to {}: {}", self.file_path.display(), e);
        }
        if let Some(history) = self.history.as_mut() {
            history.record(&doc);
        }
    }

    /// Install a history that receives every saved document.
    #[allow(dead_code)]
    pub fn set_history(&mut self, history: Box<dyn History>) {
        self.history = Some(history);
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    #[cfg(test)]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[cfg(test)]
    pub fn context_menu_open(&self) -> bool {
        self.context_menu_open
    }

    #[cfg(test)]
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    #[cfg(test)]
    pub fn copy_buffer_len(&self) -> usize {
        self.copy_buffer.len()
    }

    pub fn selected_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.selected).count()
    }

    fn allocate_id(&mut self) -> TaskId {
        self.next_id += 1;
        self.next_id
    }

    pub fn snap(&self, p: Pos2) -> Pos2 {
        snap_to_grid(p.to_vec2(), self.grid_size).to_pos2()
    }

    /// Append a fresh task at `world`, its target snapped to the grid.
    pub fn add_task(&mut self, world: Pos2) -> TaskId {
        let id = self.allocate_id();
        let mut task = Task::new(id, world);
        task.position = self.snap(world);
        self.tasks.push(task);
        id
    }

    /// Whether anything on the board is still moving.
    pub fn is_animating(&self) -> bool {
        (self.zoom - ZOOM_LEVELS[self.zoom_level]).abs() > 1e-3
            || self.task_open
            || self.selecting
            || self.double_click_timer >= 0
            || self
                .tasks
                .iter()
                .any(|t| t.rect.min != t.position || t.is_completable() || t.is_resizing())
    }

    // ---------------------------------------------------------------
    // Messages
    // ---------------------------------------------------------------

    /// Deliver `msg` to every task, then whatever they say in response.
    pub fn broadcast(&mut self, msg: Message, platform: &mut dyn Platform) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            for task in &mut self.tasks {
                task.handle(msg, platform);
                queue.extend(task.take_messages());
            }
            self.observe(msg);
        }
    }

    /// Deliver `msg` to one task only.
    fn send(&mut self, index: usize, msg: Message, platform: &mut dyn Platform) {
        let Some(task) = self.tasks.get_mut(index) else {
            return;
        };
        task.handle(msg, platform);
        for reply in task.take_messages() {
            self.broadcast(reply, platform);
        }
    }

    fn observe(&mut self, msg: Message) {
        match msg {
            Message::TaskOpen | Message::TaskClose { .. } => {
                self.task_open = self.tasks.iter().any(|t| t.open);
            }
            Message::Select { .. }
            | Message::Deselect
            | Message::DoubleClick
            | Message::Dropped { .. }
            | Message::SelectionRectangle => {}
        }
    }

    // ---------------------------------------------------------------
    // Update
    // ---------------------------------------------------------------

    pub fn update(&mut self, input: &FrameInput, platform: &mut dyn Platform) {
        if self.double_click_timer >= 0 {
            self.double_click_timer += 1;
            if self.double_click_timer > DOUBLE_CLICK_FRAMES {
                self.double_click_timer = -1;
                self.double_click_task = None;
            }
        }

        let menu_open = self.context_menu_open;
        if !self.task_open && !menu_open && input.wheel != 0.0 {
            self.zoom_level = step_zoom_level(self.zoom_level, input.wheel.signum() as i32);
        }
        if !self.task_open && input.middle.down {
            self.pan += input.mouse_delta();
        }

        if !self.task_open {
            self.shortcuts(input);
        }

        self.zoom = ease_toward(self.zoom, ZOOM_LEVELS[self.zoom_level], EASE_RATE);
        self.camera = Camera::new(self.pan, self.zoom, input.screen_size);
        let world_mouse = self.camera.screen_to_world(input.mouse);

        if !self.task_open {
            if input.left.pressed && !menu_open {
                self.arbitrate_click(input, world_mouse, platform);
            }
            if self.selecting && input.left.released {
                self.finish_rubber_band(input, world_mouse, platform);
            }
        }

        for path in &input.dropped_files {
            self.add_dropped_image(path, platform);
        }

        let frame = TaskFrame {
            input,
            camera: self.camera,
            world_mouse,
            grid_size: self.grid_size,
            selecting: self.selecting,
            world_interaction: !self.task_open && !self.context_menu_open,
        };
        for i in 0..self.tasks.len() {
            self.tasks[i].update(&frame, &*platform);
            for msg in self.tasks[i].take_messages() {
                self.broadcast(msg, platform);
            }
        }
    }

    fn shortcuts(&mut self, input: &FrameInput) {
        let ctrl = input.modifiers.ctrl;

        for (key, level) in [(Key::Num1, 0), (Key::Num2, 1), (Key::Num3, 2)] {
            if input.key_pressed(key) {
                self.zoom_level = level;
            }
        }
        if input.key_pressed(Key::Backspace) {
            self.pan = input.screen_size / 2.0;
        }
        if ctrl && input.key_pressed(Key::A) {
            for task in &mut self.tasks {
                task.selected = true;
            }
        }
        if ctrl && input.key_pressed(Key::C) {
            self.copy_selected();
        }
        if ctrl && input.key_pressed(Key::V) {
            self.paste();
        }
        if !ctrl && input.key_pressed(Key::C) {
            for task in self.tasks.iter_mut().filter(|t| t.selected) {
                task.toggle_completion();
            }
        }
        if input.key_pressed(Key::Delete) {
            self.delete_selected();
        }
        if !ctrl && input.key_pressed(Key::T) {
            self.time_scale_rate = self.time_scale_rate.next();
        }
    }

    fn arbitrate_click(&mut self, input: &FrameInput, world_mouse: Pos2, platform: &mut dyn Platform) {
        // last in the list is drawn on top
        let hit = self.tasks.iter().rposition(|t| t.rect.contains(world_mouse));

        match hit {
            None => {
                self.selection_start = world_mouse;
                self.selecting = true;
                self.broadcast(Message::SelectionRectangle, platform);
            }
            Some(index) => {
                let id = self.tasks[index].id;
                if input.modifiers.shift {
                    let msg = if self.tasks[index].selected {
                        Message::Deselect
                    } else {
                        Message::Select { task: Some(id) }
                    };
                    self.send(index, msg, platform);
                } else if !self.tasks[index].selected {
                    self.broadcast(Message::Select { task: Some(id) }, platform);
                }

                let repeat = self.double_click_task == Some(id)
                    && (1..=DOUBLE_CLICK_FRAMES).contains(&self.double_click_timer);
                if repeat && self.tasks[index].selected {
                    self.send(index, Message::DoubleClick, platform);
                }
            }
        }

        self.double_click_timer = 0;
        self.double_click_task = hit.map(|i| self.tasks[i].id);
    }

    pub fn selection_rect(&self, world_mouse: Pos2) -> Rect {
        Rect::from_two_pos(self.selection_start, world_mouse)
    }

    fn finish_rubber_band(&mut self, input: &FrameInput, world_mouse: Pos2, platform: &mut dyn Platform) {
        let band = self.selection_rect(world_mouse);
        self.selecting = false;

        for i in 0..self.tasks.len() {
            let inside = self.tasks[i].rect.intersects(band);
            let id = self.tasks[i].id;
            if input.modifiers.alt {
                if inside {
                    self.send(i, Message::Deselect, platform);
                }
            } else if inside {
                self.send(i, Message::Select { task: Some(id) }, platform);
            } else if !input.modifiers.shift {
                self.send(i, Message::Select { task: None }, platform);
            }
        }
    }

    fn add_dropped_image(&mut self, path: &Path, platform: &mut dyn Platform) {
        let id = self.allocate_id();
        let mut task = Task::new(id, self.camera.target);
        task.position = self.snap(self.camera.target);
        task.set_kind(TaskType::Image);
        task.image_path = path.display().to_string();
        self.tasks.push(task);
        log::info!("dropped {}", path.display());
        self.broadcast(Message::TaskClose { task: id }, platform);
    }

    // ---------------------------------------------------------------
    // Selection commands
    // ---------------------------------------------------------------

    pub fn delete_selected(&mut self) {
        self.tasks.retain(|t| !t.selected);
    }

    /// Remember the selected tasks for the next paste.
    pub fn copy_selected(&mut self) {
        self.copy_buffer = self
            .tasks
            .iter()
            .filter(|t| t.selected)
            .map(|t| (t.id, t.clone()))
            .collect();
    }

    /// Deselect everything and append a selected clone of each copied task,
    /// taken from its current state on the board.
    pub fn paste(&mut self) {
        for task in &mut self.tasks {
            task.selected = false;
        }
        let mut id = self.next_id;
        let clones: Vec<Task> = self
            .copy_buffer
            .iter()
            .map(|(source, fallback)| {
                id += 1;
                let live = self.tasks.iter().find(|t| t.id == *source);
                live.unwrap_or(fallback).duplicate(id)
            })
            .collect();
        self.next_id = id;
        self.tasks.extend(clones);
    }

    // ---------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------

    pub fn draw_world(&self, painter: &Painter, input: &FrameInput) {
        let world_mouse = self.camera.screen_to_world(input.mouse);
        let frame = TaskFrame {
            input,
            camera: self.camera,
            world_mouse,
            grid_size: self.grid_size,
            selecting: self.selecting,
            world_interaction: !self.task_open && !self.context_menu_open,
        };
        for task in &self.tasks {
            catch_or((), || task.draw(painter, &frame));
        }

        if self.selecting {
            let band = self.camera.world_rect_to_screen(self.selection_rect(world_mouse));
            painter.rect_filled(band, 0.0, PlanColors::SELECTION);
            painter.rect_stroke(band, 0.0, Stroke::new(1.0, PlanColors::CLICKED.outline));
        }
    }

    pub fn draw_gui(&mut self, painter: &Painter, input: &FrameInput, platform: &mut dyn Platform) {
        if self.time_scale_rate != TimeScaleRate::Off && !self.task_open {
            let now = chrono::Local::now().naive_local();
            let markers = timescale::markers(self.time_scale_rate, now, self.grid_size);
            timescale::draw_ruler(painter, &self.camera, &markers);
        }

        self.context_menu(painter, input, platform);

        for i in 0..self.tasks.len() {
            if self.tasks[i].open {
                self.tasks[i].draw_editor(painter, input, platform);
                for msg in self.tasks[i].take_messages() {
                    self.broadcast(msg, platform);
                }
            }
        }

        self.status_bar(painter, input);
    }

    fn context_menu(&mut self, painter: &Painter, input: &FrameInput, platform: &mut dyn Platform) {
        if !self.context_menu_open {
            if input.right.released && !self.task_open {
                self.context_menu_open = true;
                self.context_menu_position = input.mouse;
            }
            return;
        }

        let origin = self.context_menu_position;
        let entry = |i: f32| Rect::from_min_size(origin + vec2(0.0, MENU_ENTRY_SIZE.y * i), MENU_ENTRY_SIZE);
        let selected = self.selected_count();

        if button(painter, input, entry(0.0), "New Task", false) {
            let world = self.camera.screen_to_world(origin);
            let id = self.add_task(world);
            self.broadcast(Message::Select { task: Some(id) }, platform);
        }
        if button(painter, input, entry(1.0), &delete_label(selected), selected == 0) {
            self.delete_selected();
        }
        if button(painter, input, entry(2.0), "Copy Tasks", selected == 0) {
            self.copy_selected();
        }
        if button(painter, input, entry(3.0), "Paste Tasks", self.copy_buffer.is_empty()) {
            self.paste();
        }

        if input.any_released() {
            self.context_menu_open = false;
        }
    }

    pub fn status_text(&self) -> String {
        let total = self.tasks.iter().filter(|t| t.is_completable()).count();
        let completed = self.tasks.iter().filter(|t| t.is_completable() && t.is_complete()).count();
        let percent = if total > 0 && completed > 0 { completed * 100 / total } else { 0 };

        let mut text = format!(
            "{} Task{}, {} completed, {}% complete",
            total,
            if total == 1 { "" } else { "s" },
            completed,
            percent
        );
        let selected = self.selected_count();
        if selected > 0 {
            text.push_str(&format!(" ({} selected)", selected));
        }
        text
    }

    fn status_bar(&self, painter: &Painter, input: &FrameInput) {
        let bar = Rect::from_min_max(
            pos2(0.0, input.screen_size.y - STATUS_BAR_HEIGHT),
            input.screen_size.to_pos2(),
        );
        painter.rect_filled(bar, 0.0, PlanColors::DEFAULT.inside);
        painter.line_segment(
            [bar.left_top(), bar.right_top()],
            Stroke::new(1.0, PlanColors::DEFAULT.outline),
        );
        draw_text(painter, bar.min + vec2(4.0, 2.0), &self.status_text(), PlanColors::DEFAULT.text, 1.0);
    }
}

fn delete_label(count: usize) -> String {
    match count {
        0 => "Delete Tasks".to_string(),
        1 => "Delete 1 Task".to_string(),
        n => format!("Delete {} Tasks", n),
    }
}
