//! Task cards
//!
//! A task is one card on the board. Its sub-widgets (type spinner,
//! description, completion checkbox and progress bar) are plain values, so
//! cloning a task copies every one of them.
//!
//! Tasks never reach back into the project. Each frame the project hands a
//! [`TaskFrame`] to [`Task::update`] and [`Task::draw`]; whatever the task
//! wants to say to the rest of the board is queued and collected with
//! [`Task::take_messages`].

use crate::camera::Camera;
use crate::message::{Message, TaskId};
use crate::platform::Platform;
use egui::{pos2, vec2, Color32, Painter, Pos2, Rect, Stroke, TextureHandle, Vec2};
use plancore::animation::{brighten, ease_pos, pulse, settled, EASE_RATE};
use plancore::theme::{PlanColors, StateColors, TextMeasure};
use plancore::widgets::{button, draw_frame, draw_text, label, Checkbox, ProgressBar, Spinner, TextBox};
use plancore::{snap_to_grid, FrameInput};
use std::path::Path;

/// Smallest a card can get.
pub const MIN_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// Room around the name inside a card.
pub const NAME_PADDING: f32 = 4.0;

/// Side of the image resize handles.
pub const HANDLE_SIZE: f32 = 8.0;

/// Gap between the editor panel and the screen edge.
pub const EDITOR_MARGIN: f32 = 16.0;

const ROW_HEIGHT: f32 = 24.0;
const LABEL_WIDTH: f32 = 112.0;
const DESCRIPTION_MIN: Vec2 = Vec2::new(320.0, 24.0);
const DESCRIPTION_MAX: Vec2 = Vec2::new(760.0, 320.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Checkbox,
    ProgressBar,
    Note,
    Image,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [Self::Checkbox, Self::ProgressBar, Self::Note, Self::Image];

    pub fn label(self) -> &'static str {
        match self {
            Self::Checkbox => "Check Box",
            Self::ProgressBar => "Progress Bar",
            Self::Note => "Note",
            Self::Image => "Image",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Spinner index to type. Out-of-range indices wrap.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Whether the type counts toward completion statistics.
    pub fn is_completable(self) -> bool {
        matches!(self, Self::Checkbox | Self::ProgressBar)
    }
}

/// Board state a task needs for one frame.
pub struct TaskFrame<'a> {
    pub input: &'a FrameInput,
    pub camera: Camera,
    pub world_mouse: Pos2,
    pub grid_size: f32,
    /// A rubber band is being dragged.
    pub selecting: bool,
    /// False while the context menu or an editor owns the mouse.
    pub world_interaction: bool,
}

#[derive(Clone)]
pub struct Task {
    pub id: TaskId,
    /// Grid-snapped resting place; `rect` eases toward it.
    pub position: Pos2,
    pub rect: Rect,
    pub min_size: Vec2,
    pub selected: bool,
    pub open: bool,
    pub task_type: Spinner,
    pub description: TextBox,
    pub completion_checkbox: Checkbox,
    pub completion_progress: ProgressBar,
    pub image_path: String,
    /// Path the current texture was loaded from.
    pub prev_image_path: String,
    pub image_display_size: Vec2,
    image: Option<TextureHandle>,
    resizing: bool,
    outbox: Vec<Message>,
}

impl Task {
    pub fn new(id: TaskId, position: Pos2) -> Self {
        Self {
            id,
            position,
            rect: Rect::from_min_size(position, MIN_SIZE),
            min_size: MIN_SIZE,
            selected: false,
            open: false,
            task_type: Spinner::new(TaskType::ALL.map(TaskType::label)),
            description: TextBox::new(true, DESCRIPTION_MIN, DESCRIPTION_MAX),
            completion_checkbox: Checkbox::default(),
            completion_progress: ProgressBar::default(),
            image_path: String::new(),
            prev_image_path: String::new(),
            image_display_size: Vec2::ZERO,
            image: None,
            resizing: false,
            outbox: Vec::new(),
        }
    }

    pub fn kind(&self) -> TaskType {
        TaskType::from_index(self.task_type.current)
    }

    pub fn set_kind(&mut self, kind: TaskType) {
        self.task_type.set_current(kind.index());
    }

    pub fn is_completable(&self) -> bool {
        self.kind().is_completable()
    }

    pub fn is_complete(&self) -> bool {
        match self.kind() {
            TaskType::Checkbox => self.completion_checkbox.checked,
            TaskType::ProgressBar => self.completion_progress.percentage >= 100,
            TaskType::Note | TaskType::Image => false,
        }
    }

    /// Text shown on the card: the first description line, with a marker
    /// when more lines follow. Image cards show nothing.
    pub fn name(&self) -> String {
        if self.kind() == TaskType::Image {
            return String::new();
        }
        match self.description.text.split_once('\n') {
            Some((first, _)) => format!("{}[...]", first),
            None => self.description.text.clone(),
        }
    }

    #[cfg(test)]
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.image.as_ref()
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// Native pixel size of the loaded image.
    pub fn native_image_size(&self) -> Option<Vec2> {
        self.image.as_ref().map(|tex| {
            let [w, h] = tex.size();
            vec2(w as f32, h as f32)
        })
    }

    /// Messages queued since the last call.
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }

    /// Flip completion; the progress bar follows the checkbox.
    pub fn toggle_completion(&mut self) {
        self.completion_checkbox.checked = !self.completion_checkbox.checked;
        let percentage = if self.completion_checkbox.checked { 100 } else { 0 };
        self.completion_progress.set(percentage);
    }

    /// Independent copy under a new id, selected and with its editor closed.
    pub fn duplicate(&self, id: TaskId) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy.selected = true;
        copy.open = false;
        copy.resizing = false;
        copy.description.focused = false;
        copy.outbox.clear();
        copy
    }

    /// World-space handle that drags the image size.
    pub fn resize_handle(&self) -> Rect {
        Rect::from_min_max(self.rect.max - Vec2::splat(HANDLE_SIZE), self.rect.max)
    }

    /// World-space handle that restores the native image size.
    pub fn reset_handle(&self) -> Rect {
        Rect::from_min_size(self.rect.min, Vec2::splat(HANDLE_SIZE))
    }

    pub fn update<M: TextMeasure + ?Sized>(&mut self, frame: &TaskFrame, measure: &M) {
        let input = frame.input;

        // size follows the name, then the image, then the floor
        let measured = measure.measure_text(&self.name());
        let cell = |v: f32| {
            if frame.grid_size > 0.0 {
                ((v + NAME_PADDING) / frame.grid_size).ceil() * frame.grid_size
            } else {
                v + NAME_PADDING
            }
        };
        let mut size = vec2(cell(measured.x), cell(measured.y));
        if self.kind() == TaskType::Image && self.image.is_some() {
            size = size.max(self.image_display_size);
        }
        size = size.max(self.min_size);
        self.rect = Rect::from_min_size(self.rect.min, size);

        if self.kind() == TaskType::Image && self.selected && frame.world_interaction && input.left.pressed {
            if self.resize_handle().contains(frame.world_mouse) {
                self.resizing = true;
            } else if self.reset_handle().contains(frame.world_mouse) {
                if let Some(native) = self.native_image_size() {
                    self.image_display_size = native;
                }
            }
        }
        if self.resizing {
            if input.left.down && frame.world_interaction {
                self.image_display_size = (frame.world_mouse - self.rect.min).max(self.min_size);
            } else {
                self.resizing = false;
            }
        }

        let dragging = frame.world_interaction
            && self.selected
            && input.left.down
            && !frame.selecting
            && !self.resizing;
        if dragging {
            self.position += input.mouse_delta() / frame.camera.zoom;
        } else {
            if input.left.released {
                self.outbox.push(Message::Dropped { task: self.id });
            }
            self.position = snap_to_grid(self.position.to_vec2(), frame.grid_size).to_pos2();
            if settled(self.rect.min, self.position, 1.0) {
                self.rect = Rect::from_min_size(self.position, self.rect.size());
            }
        }

        let min = ease_pos(self.rect.min, self.position, EASE_RATE);
        self.rect = Rect::from_min_size(min, self.rect.size());
    }

    pub fn fill_color(&self, time: f64) -> Color32 {
        let mut color = PlanColors::DEFAULT.inside;
        if self.is_complete() {
            color = Color32::from_rgb(color.r().saturating_sub(127), color.g(), color.b().saturating_sub(127));
        }
        if self.kind() == TaskType::Note {
            color = PlanColors::NOTE;
        }
        if self.is_completable() {
            let amplitude = if self.selected { 40.0 } else { 10.0 };
            color = brighten(color, pulse(time, self.id as f32 * 0.7, amplitude));
        }
        color
    }

    pub fn draw(&self, painter: &Painter, frame: &TaskFrame) {
        let cam = &frame.camera;
        let zoom = cam.zoom;
        let screen = cam.world_rect_to_screen(self.rect);
        let fill = self.fill_color(frame.input.time);

        let shadow = Color32::from_rgba_unmultiplied(fill.r(), fill.g(), fill.b(), fill.a() / 4);
        painter.rect_filled(screen.translate(vec2(4.0, 2.0) * zoom), 0.0, shadow);
        painter.rect_filled(screen, 0.0, fill);

        if self.kind() == TaskType::ProgressBar && self.completion_progress.percentage < 100 {
            let inner = screen.shrink(2.0 * zoom);
            let width = inner.width() * self.completion_progress.percentage as f32 / 100.0;
            painter.rect_filled(
                Rect::from_min_size(inner.min, vec2(width, inner.height())),
                0.0,
                PlanColors::PROGRESS,
            );
        }

        if self.kind() == TaskType::Image {
            if let Some(tex) = &self.image {
                let dest = Rect::from_min_size(screen.min, self.image_display_size * zoom);
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(tex.id(), dest, uv, Color32::WHITE);
            }
        }

        let outline = if self.selected {
            PlanColors::HIGHLIGHTED.outline
        } else {
            PlanColors::DEFAULT.outline
        };
        painter.rect_stroke(screen, 0.0, Stroke::new(zoom.max(1.0), outline));

        let name_pos = cam.world_to_screen(self.rect.min + vec2(2.0, 2.0));
        draw_text(painter, name_pos, &self.name(), PlanColors::DEFAULT.text, zoom);

        if self.kind() == TaskType::Image && self.selected {
            for handle in [self.reset_handle(), self.resize_handle()] {
                painter.rect_filled(cam.world_rect_to_screen(handle), 0.0, PlanColors::HIGHLIGHTED.outline);
            }
        }
    }

    /// Modal editor, drawn over the GUI layer while the task is open.
    pub fn draw_editor(&mut self, painter: &Painter, input: &FrameInput, platform: &mut dyn Platform) {
        if !self.open {
            return;
        }

        let panel = Rect::from_min_max(
            pos2(EDITOR_MARGIN, EDITOR_MARGIN),
            (input.screen_size - Vec2::splat(EDITOR_MARGIN)).to_pos2(),
        );
        draw_frame(
            painter,
            panel,
            StateColors { inside: PlanColors::BACKGROUND, ..PlanColors::DEFAULT },
        );

        let x = panel.min.x + 16.0;
        let field_x = x + LABEL_WIDTH;
        let mut y = panel.min.y + 16.0;
        let label_at = |y: f32, text: &str| label(painter, pos2(x, y + 7.0), text);

        label_at(y, "Task Type:");
        self.task_type.show(painter, input, Rect::from_min_size(pos2(field_x, y), vec2(192.0, ROW_HEIGHT)));
        y += ROW_HEIGHT + 8.0;

        if self.kind() != TaskType::Image {
            label_at(y, "Description:");
            self.description.show(painter, input, pos2(field_x, y), &*platform);
            y += self.description.rect().height() + 8.0;
        }

        match self.kind() {
            TaskType::Checkbox => {
                label_at(y, "Completed:");
                self.completion_checkbox.show(
                    painter,
                    input,
                    Rect::from_min_size(pos2(field_x, y + 4.0), vec2(16.0, 16.0)),
                );
            }
            TaskType::ProgressBar => {
                label_at(y, "Percentage:");
                self.completion_progress.show(
                    painter,
                    input,
                    Rect::from_min_size(pos2(field_x, y), vec2(192.0, ROW_HEIGHT)),
                );
            }
            TaskType::Image => {
                label_at(y, "Image File:");
                let shown = if self.image_path.is_empty() { "<none>" } else { self.image_path.as_str() };
                label_at(y + ROW_HEIGHT, shown);
                let load = Rect::from_min_size(pos2(field_x, y), vec2(64.0, ROW_HEIGHT));
                if button(painter, input, load, "Load", false) {
                    if let Some(path) = platform.pick_png() {
                        self.image_path = path.display().to_string();
                    }
                }
                let clear = load.translate(vec2(72.0, 0.0));
                if button(painter, input, clear, "Clear", false) {
                    self.image_path.clear();
                }
            }
            TaskType::Note => {}
        }

        let close = Rect::from_min_size(pos2(panel.max.x - ROW_HEIGHT - 8.0, panel.min.y + 8.0), Vec2::splat(ROW_HEIGHT));
        if button(painter, input, close, "X", false) {
            self.close();
        }
    }

    /// Close the editor and tell the board.
    pub fn close(&mut self) {
        self.open = false;
        self.description.focused = false;
        self.outbox.push(Message::TaskClose { task: self.id });
    }

    pub fn handle(&mut self, msg: Message, platform: &mut dyn Platform) {
        match msg {
            Message::Select { task } => self.selected = task == Some(self.id),
            Message::Deselect => self.selected = false,
            Message::DoubleClick => {
                self.open = true;
                self.outbox.push(Message::TaskOpen);
            }
            Message::TaskClose { task } if task == self.id => self.reload_image(platform),
            Message::TaskClose { .. }
            | Message::TaskOpen
            | Message::Dropped { .. }
            | Message::SelectionRectangle => {}
        }
    }

    fn reload_image(&mut self, platform: &mut dyn Platform) {
        if self.image_path.is_empty() {
            self.image = None;
            self.prev_image_path.clear();
            return;
        }

        let changed = self.image_path != self.prev_image_path;
        if changed || self.image.is_none() {
            self.image = platform.load_texture(Path::new(&self.image_path));
            if changed {
                if let Some(native) = self.native_image_size() {
                    self.image_display_size = native;
                }
            }
        }
        self.prev_image_path = self.image_path.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPlatform;
    use plancore::input::ButtonState;

    const SCREEN: Vec2 = Vec2::new(960.0, 540.0);

    fn frame(input: &FrameInput) -> TaskFrame<'_> {
        TaskFrame {
            input,
            camera: Camera::new(Vec2::ZERO, 1.0, SCREEN),
            world_mouse: input.mouse,
            grid_size: 16.0,
            selecting: false,
            world_interaction: true,
        }
    }

    fn idle() -> FrameInput {
        FrameInput::at(pos2(900.0, 500.0), SCREEN)
    }

    fn settle(task: &mut Task, platform: &MockPlatform) {
        for _ in 0..100 {
            task.update(&frame(&idle()), platform);
        }
    }

    #[test]
    fn test_name_rules() {
        let mut task = Task::new(1, Pos2::ZERO);
        task.description.text = "Buy milk".into();
        assert_eq!(task.name(), "Buy milk");
        task.description.text = "Buy milk\nand eggs\nand bread".into();
        assert_eq!(task.name(), "Buy milk[...]");
        task.set_kind(TaskType::Image);
        assert_eq!(task.name(), "");
    }

    #[test]
    fn test_type_table() {
        assert_eq!(TaskType::from_index(1), TaskType::ProgressBar);
        assert_eq!(TaskType::from_index(5), TaskType::ProgressBar);
        assert!(TaskType::Checkbox.is_completable());
        assert!(!TaskType::Note.is_completable());
        assert!(!TaskType::Image.is_completable());
        let task = Task::new(1, Pos2::ZERO);
        assert_eq!(task.task_type.options, vec!["Check Box", "Progress Bar", "Note", "Image"]);
        assert_eq!(task.kind(), TaskType::Checkbox);
    }

    #[test]
    fn test_size_rounds_up_to_grid() {
        let platform = MockPlatform::new();
        let mut task = Task::new(1, Pos2::ZERO);
        task.update(&frame(&idle()), &platform);
        assert_eq!(task.rect.size(), MIN_SIZE);

        // 8 glyphs = 48 + 4 padding -> 64; 10 + 4 -> 16
        task.description.text = "Buy milk".into();
        task.update(&frame(&idle()), &platform);
        assert_eq!(task.rect.size(), vec2(64.0, 16.0));
    }

    #[test]
    fn test_image_rect_covers_display_size() {
        let mut platform = MockPlatform::new();
        let mut task = Task::new(1, Pos2::ZERO);
        task.set_kind(TaskType::Image);
        task.image_path = "foo.png".into();
        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        assert_eq!(task.image_display_size, vec2(40.0, 24.0));

        task.update(&frame(&idle()), &platform);
        assert!(task.rect.width() >= 40.0 && task.rect.height() >= 24.0);
    }

    #[test]
    fn test_drag_moves_by_world_delta_then_snaps() {
        let platform = MockPlatform::new();
        let mut task = Task::new(1, pos2(32.0, 32.0));
        task.selected = true;

        let mut input = FrameInput::at(pos2(50.0, 40.0), SCREEN);
        input.prev_mouse = pos2(40.0, 40.0);
        input.left = ButtonState::HELD;
        let mut f = frame(&input);
        f.camera.zoom = 2.0;
        task.update(&f, &platform);
        assert_eq!(task.position, pos2(37.0, 32.0));

        let mut release = FrameInput::at(pos2(50.0, 40.0), SCREEN);
        release.left = ButtonState::RELEASED;
        task.update(&frame(&release), &platform);
        assert_eq!(task.position, pos2(32.0, 32.0));
        assert_eq!(task.take_messages(), vec![Message::Dropped { task: 1 }]);
        assert!(task.take_messages().is_empty());
    }

    #[test]
    fn test_no_drag_while_rubber_banding_or_blocked() {
        let platform = MockPlatform::new();
        let mut task = Task::new(1, pos2(32.0, 32.0));
        task.selected = true;
        let mut input = FrameInput::at(pos2(80.0, 40.0), SCREEN);
        input.prev_mouse = pos2(40.0, 40.0);
        input.left = ButtonState::HELD;

        let mut f = frame(&input);
        f.selecting = true;
        task.update(&f, &platform);
        assert_eq!(task.position, pos2(32.0, 32.0));

        let mut f = frame(&input);
        f.world_interaction = false;
        task.update(&f, &platform);
        assert_eq!(task.position, pos2(32.0, 32.0));
    }

    #[test]
    fn test_rect_eases_and_lands() {
        let platform = MockPlatform::new();
        let mut task = Task::new(1, Pos2::ZERO);
        task.position = pos2(100.0, 0.0);
        task.update(&frame(&idle()), &platform);
        // 100 is not on the 16 grid; snapped to 96 first
        assert_eq!(task.position, pos2(96.0, 0.0));
        assert!((task.rect.min.x - 19.2).abs() < 1e-3);

        settle(&mut task, &platform);
        assert_eq!(task.rect.min, pos2(96.0, 0.0));
        assert!(task.rect.width() >= MIN_SIZE.x && task.rect.height() >= MIN_SIZE.y);
    }

    #[test]
    fn test_resize_handle_tracks_mouse() {
        let mut platform = MockPlatform::new();
        let mut task = Task::new(1, Pos2::ZERO);
        task.set_kind(TaskType::Image);
        task.image_path = "foo.png".into();
        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        task.selected = true;
        settle(&mut task, &platform);
        assert_eq!(task.rect, Rect::from_min_size(Pos2::ZERO, vec2(40.0, 24.0)));

        let grab = task.resize_handle().center();
        let mut press = FrameInput::at(grab, SCREEN);
        press.left = ButtonState::PRESSED;
        task.update(&frame(&press), &platform);
        assert!(task.is_resizing());

        let mut hold = FrameInput::at(pos2(100.0, 60.0), SCREEN);
        hold.prev_mouse = grab;
        hold.left = ButtonState::HELD;
        task.update(&frame(&hold), &platform);
        assert_eq!(task.image_display_size, vec2(100.0, 60.0));
        assert_eq!(task.position, Pos2::ZERO, "resizing does not drag");

        let mut tiny = FrameInput::at(pos2(2.0, 2.0), SCREEN);
        tiny.left = ButtonState::HELD;
        task.update(&frame(&tiny), &platform);
        assert_eq!(task.image_display_size, MIN_SIZE);

        let mut release = FrameInput::at(pos2(2.0, 2.0), SCREEN);
        release.left = ButtonState::RELEASED;
        task.update(&frame(&release), &platform);
        assert!(!task.is_resizing());
    }

    #[test]
    fn test_reset_handle_restores_native_size() {
        let mut platform = MockPlatform::new();
        let mut task = Task::new(1, Pos2::ZERO);
        task.set_kind(TaskType::Image);
        task.image_path = "foo.png".into();
        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        task.selected = true;
        task.image_display_size = vec2(200.0, 200.0);
        settle(&mut task, &platform);

        let mut press = FrameInput::at(pos2(2.0, 2.0), SCREEN);
        press.left = ButtonState::PRESSED;
        task.update(&frame(&press), &platform);
        assert_eq!(task.image_display_size, vec2(40.0, 24.0));
    }

    #[test]
    fn test_select_and_double_click_messages() {
        let mut platform = MockPlatform::new();
        let mut task = Task::new(7, Pos2::ZERO);
        task.handle(Message::Select { task: Some(7) }, &mut platform);
        assert!(task.selected);
        task.handle(Message::Select { task: Some(8) }, &mut platform);
        assert!(!task.selected);
        task.selected = true;
        task.handle(Message::Select { task: None }, &mut platform);
        assert!(!task.selected);
        task.selected = true;
        task.handle(Message::Deselect, &mut platform);
        assert!(!task.selected);

        task.handle(Message::DoubleClick, &mut platform);
        assert!(task.open);
        assert_eq!(task.take_messages(), vec![Message::TaskOpen]);

        task.close();
        assert!(!task.open);
        assert_eq!(task.take_messages(), vec![Message::TaskClose { task: 7 }]);
    }

    #[test]
    fn test_task_close_reload_rules() {
        let mut platform = MockPlatform::new();
        let mut task = Task::new(1, Pos2::ZERO);
        task.set_kind(TaskType::Image);

        // addressed elsewhere: ignored
        task.image_path = "a.png".into();
        task.handle(Message::TaskClose { task: 2 }, &mut platform);
        assert!(platform.loads.is_empty());

        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        assert_eq!(platform.loads.len(), 1);
        assert_eq!(task.prev_image_path, "a.png");

        // same path, already loaded: no reload, size kept
        task.image_display_size = vec2(90.0, 90.0);
        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        assert_eq!(platform.loads.len(), 1);
        assert_eq!(task.image_display_size, vec2(90.0, 90.0));

        // new path: reload and reset to native size
        platform.texture_size = [10, 12];
        task.image_path = "b.png".into();
        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        assert_eq!(platform.loads.len(), 2);
        assert_eq!(task.image_display_size, vec2(10.0, 12.0));

        // failed load leaves no texture
        task.image_path = "broken.jpg".into();
        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        assert!(task.texture().is_none());

        task.image_path.clear();
        task.handle(Message::TaskClose { task: 1 }, &mut platform);
        assert!(task.texture().is_none());
        assert!(task.prev_image_path.is_empty());
    }

    #[test]
    fn test_toggle_completion() {
        let mut task = Task::new(1, Pos2::ZERO);
        task.set_kind(TaskType::ProgressBar);
        let mut seen = Vec::new();
        for _ in 0..3 {
            task.toggle_completion();
            seen.push((task.completion_checkbox.checked, task.completion_progress.percentage));
        }
        assert_eq!(seen, vec![(true, 100), (false, 0), (true, 100)]);
        assert!(task.is_complete());
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut source = Task::new(1, pos2(16.0, 16.0));
        source.description.text = "original".into();
        source.open = true;

        let mut copy = source.duplicate(2);
        assert_eq!(copy.id, 2);
        assert!(copy.selected);
        assert!(!copy.open);

        copy.description.text.push_str(" changed");
        copy.completion_checkbox.checked = true;
        copy.completion_progress.set(55);
        copy.set_kind(TaskType::Note);
        assert_eq!(source.description.text, "original");
        assert!(!source.completion_checkbox.checked);
        assert_eq!(source.completion_progress.percentage, 0);
        assert_eq!(source.kind(), TaskType::Checkbox);
    }

    #[test]
    fn test_fill_color() {
        let mut note = Task::new(1, Pos2::ZERO);
        note.set_kind(TaskType::Note);
        assert_eq!(note.fill_color(0.3), PlanColors::NOTE);

        let mut done = Task::new(2, Pos2::ZERO);
        done.completion_checkbox.checked = true;
        let c = done.fill_color(0.0);
        // 201 - 127 = 74, plus at most 10 of pulse
        assert!(c.r() <= 84 && c.g() >= 191);
    }

    #[test]
    fn test_editor_close_button() {
        let mut platform = MockPlatform::new();
        let ctx = egui::Context::default();
        let mut task = Task::new(3, Pos2::ZERO);
        task.open = true;
        // close button sits at the panel's top-right corner
        let mut input = FrameInput::at(pos2(960.0 - 16.0 - 8.0 - 12.0, 16.0 + 8.0 + 12.0), SCREEN);
        input.left = ButtonState::RELEASED;
        let _ = ctx.run(Default::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            task.draw_editor(&painter, &input, &mut platform);
            task.draw(&painter, &frame(&input));
        });
        assert!(!task.open);
        assert_eq!(task.take_messages(), vec![Message::TaskClose { task: 3 }]);
    }

    #[test]
    fn test_editor_panel_inset_from_screen() {
        let mut platform = MockPlatform::new();
        let ctx = egui::Context::default();
        let mut task = Task::new(3, Pos2::ZERO);
        task.open = true;

        let release_at = |task: &mut Task, platform: &mut MockPlatform, at: Pos2| {
            let mut input = FrameInput::at(at, SCREEN);
            input.left = ButtonState::RELEASED;
            let _ = ctx.run(Default::default(), |ctx| {
                let painter = ctx.layer_painter(egui::LayerId::background());
                task.draw_editor(&painter, &input, platform);
            });
        };

        // where the close button would sit without the margin
        release_at(&mut task, &mut platform, pos2(944.0, 16.0));
        assert!(task.open);
        release_at(&mut task, &mut platform, pos2(930.0, 40.0));
        assert!(!task.open);
    }

    #[test]
    fn test_editor_load_button_sets_path() {
        let mut platform = MockPlatform::new();
        platform.picked = Some("pictures/cat.png".into());
        let ctx = egui::Context::default();
        let mut task = Task::new(3, Pos2::ZERO);
        task.set_kind(TaskType::Image);
        task.open = true;
        // Load sits in the second row
        let mut input = FrameInput::at(pos2(16.0 + 16.0 + LABEL_WIDTH + 32.0, 16.0 + 16.0 + 32.0 + 12.0), SCREEN);
        input.left = ButtonState::RELEASED;
        let _ = ctx.run(Default::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            task.draw_editor(&painter, &input, &mut platform);
        });
        assert_eq!(task.image_path, std::path::PathBuf::from("pictures/cat.png").display().to_string());
        assert!(task.open);
    }
}
