//! Session Controller
//!
//! Top-level state for one drawing session. Every UI call runs to completion
//! on the caller's thread; refused calls return an error and leave state as
//! it was.

use easel_history::{History, HistoryStatus};
use easel_layers::{LayerId, LayerStack, compositor};
use easel_raster::{Point, Snapshot, Surface};

use crate::shortcuts::{Command, Key, Modifiers};
use crate::{
    Color, HistoryMode, MoveOutcome, SessionConfig, SessionError, StrokeRenderer, Tool, ToolState,
};

/// Suggested file name for exported drawings
pub const EXPORT_FILE_NAME: &str = "drawing.png";

/// One undo step
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    /// Flattened composite, restored into the active layer
    Composite(Snapshot),
    /// Per-layer pixels keyed by layer id
    Layers(Vec<(LayerId, Snapshot)>),
}

impl HistoryEntry {
    fn capture(mode: HistoryMode, layers: &LayerStack, composite: &Surface) -> Self {
        match mode {
            HistoryMode::FlattenedActive => HistoryEntry::Composite(composite.encode_snapshot()),
            HistoryMode::LayerStack => HistoryEntry::Layers(
                layers
                    .layers()
                    .iter()
                    .map(|l| (l.id(), l.surface().encode_snapshot()))
                    .collect(),
            ),
        }
    }

    /// Write this entry back into the stack.
    ///
    /// Layers created after the entry was taken have no pixels in it and are
    /// cleared.
    fn restore(&self, layers: &mut LayerStack) -> Result<(), SessionError> {
        match self {
            HistoryEntry::Composite(snapshot) => {
                layers.active_mut().surface_mut().restore(snapshot)?;
            }
            HistoryEntry::Layers(saved) => {
                for layer in layers.iter_mut() {
                    match saved.iter().find(|(id, _)| *id == layer.id()) {
                        Some((_, snapshot)) => layer.surface_mut().restore(snapshot)?,
                        None => layer.surface_mut().clear(),
                    }
                }
            }
        }
        Ok(())
    }

    /// Pixel bytes held by this entry
    pub fn byte_len(&self) -> usize {
        match self {
            HistoryEntry::Composite(snapshot) => snapshot.byte_len(),
            HistoryEntry::Layers(saved) => saved.iter().map(|(_, s)| s.byte_len()).sum(),
        }
    }
}

/// Layer row shown by the layer panel
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerInfo {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
}

/// Layer panel state, front-most layer last
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerPanel {
    pub layers: Vec<LayerInfo>,
    pub active_layer_id: LayerId,
}

/// Notification for UI collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LayersChanged(LayerPanel),
    HistoryChanged(HistoryStatus),
}

/// Flattened PNG export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Drawing session
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    tools: ToolState,
    layers: LayerStack,
    display: Surface,
    history: History<HistoryEntry>,
    renderer: StrokeRenderer,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session with one empty layer.
    ///
    /// With a non-empty viewport the blank canvas becomes the first history
    /// entry; otherwise that happens on the first `resize`.
    pub fn new(config: SessionConfig) -> Self {
        tracing::info!("Easel session {}x{} created", config.width, config.height);

        let history = match config.max_history_entries {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };

        let mut session = Self {
            tools: ToolState::new(&config),
            layers: LayerStack::new(config.width, config.height),
            display: Surface::new(config.width, config.height),
            history,
            renderer: StrokeRenderer::new(),
            events: Vec::new(),
            config,
        };
        if session.display.is_allocated() {
            session.record_history();
        }
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// What the UI should show: the composite plus any shape preview
    pub fn display(&self) -> &Surface {
        &self.display
    }

    pub fn width(&self) -> u32 {
        self.display.width()
    }

    pub fn height(&self) -> u32 {
        self.display.height()
    }

    pub fn is_drawing(&self) -> bool {
        self.renderer.is_drawing()
    }

    pub fn history(&self) -> &History<HistoryEntry> {
        &self.history
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    pub fn layer_panel(&self) -> LayerPanel {
        LayerPanel {
            layers: self
                .layers
                .layers()
                .iter()
                .map(|l| LayerInfo {
                    id: l.id(),
                    name: l.name.clone(),
                    visible: l.visible,
                })
                .collect(),
            active_layer_id: self.layers.active_id(),
        }
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // Toolbar

    pub fn set_tool(&mut self, tool: Tool) {
        tracing::debug!("Tool: {}", tool);
        self.tools.set_tool(tool);
    }

    /// Returns the size actually applied after clamping
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        self.tools.set_brush_size(size)
    }

    pub fn set_color(&mut self, color: Color) {
        self.tools.set_color(color);
    }

    pub fn set_color_hex(&mut self, hex: &str) -> Result<Color, SessionError> {
        self.tools.set_color_hex(hex)
    }

    // Pointer events

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        self.ensure_allocated("pointer down")?;
        if self.renderer.is_drawing() {
            tracing::debug!("Pointer down during a gesture, committing the previous one");
            self.commit_gesture(None);
        }

        let target = self.layers.active_mut().surface_mut();
        self.renderer.pointer_down(&self.tools, target, Point::new(x, y));
        self.recomposite();
        Ok(())
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        self.ensure_allocated("pointer move")?;

        let target = self.layers.active_mut().surface_mut();
        match self.renderer.pointer_move(target, Point::new(x, y)) {
            MoveOutcome::Ignored => {}
            MoveOutcome::Painted => self.recomposite(),
            MoveOutcome::Preview(preview) => {
                self.recomposite();
                preview.draw(&mut self.display);
            }
        }
        Ok(())
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        self.ensure_allocated("pointer up")?;
        self.commit_gesture(Some(Point::new(x, y)));
        Ok(())
    }

    /// Commits an in-progress gesture exactly like `pointer_up` at the last point
    pub fn pointer_leave(&mut self) -> Result<(), SessionError> {
        self.ensure_allocated("pointer leave")?;
        self.commit_gesture(None);
        Ok(())
    }

    // Layer panel

    pub fn add_layer(&mut self) -> LayerPanel {
        self.flush_gesture();
        let id = self.layers.add_layer();
        tracing::debug!("Active layer is now {}", id);
        self.recomposite();
        self.layers_changed()
    }

    /// Refused with `InvariantViolation` when `id` is the only layer
    pub fn delete_layer(&mut self, id: LayerId) -> Result<LayerPanel, SessionError> {
        self.flush_gesture();
        match self.layers.delete_layer(id) {
            Ok(()) => {
                self.recomposite();
                Ok(self.layers_changed())
            }
            Err(easel_layers::LayerError::NotFound(_)) => {
                tracing::debug!("Delete ignored, {} is not in the stack", id);
                Ok(self.layers_changed())
            }
            Err(err) => {
                tracing::warn!("Delete of {} refused: {}", id, err);
                self.layers_changed();
                Err(err.into())
            }
        }
    }

    pub fn toggle_visibility(&mut self, id: LayerId) -> LayerPanel {
        match self.layers.toggle_visibility(id) {
            Ok(visible) => {
                tracing::debug!("{} visible: {}", id, visible);
                self.refresh_display();
            }
            Err(err) => tracing::debug!("Toggle ignored: {}", err),
        }
        self.layers_changed()
    }

    pub fn select_layer(&mut self, id: LayerId) -> LayerPanel {
        if !self.layers.contains(id) {
            tracing::debug!("Select ignored, {} is not in the stack", id);
        } else if self.layers.active_id() != id {
            self.flush_gesture();
            if let Err(err) = self.layers.select(id) {
                tracing::debug!("Select ignored: {}", err);
            }
        }
        self.layers_changed()
    }

    // History

    pub fn undo(&mut self) -> Result<HistoryStatus, SessionError> {
        self.flush_gesture();
        if let Some(entry) = self.history.undo() {
            entry.restore(&mut self.layers)?;
            tracing::debug!("Undo to entry {:?}", self.history.cursor());
            self.recomposite();
        }
        Ok(self.history_changed())
    }

    pub fn redo(&mut self) -> Result<HistoryStatus, SessionError> {
        self.flush_gesture();
        if let Some(entry) = self.history.redo() {
            entry.restore(&mut self.layers)?;
            tracing::debug!("Redo to entry {:?}", self.history.cursor());
            self.recomposite();
        }
        Ok(self.history_changed())
    }

    /// Clear every layer and record the blank canvas as an undo step
    pub fn clear_canvas(&mut self) -> Result<HistoryStatus, SessionError> {
        self.ensure_allocated("clear canvas")?;
        self.flush_gesture();
        self.layers.clear_all();
        self.recomposite();
        self.record_history();
        Ok(self.history.status())
    }

    // Viewport and output

    /// Resize every layer and the display, keeping content at the origin.
    ///
    /// A gesture in progress is committed first.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.display.width() && height == self.display.height() {
            return;
        }
        self.flush_gesture();

        tracing::info!("Viewport resized to {}x{}", width, height);
        self.layers.resize_all(width, height);
        self.display.resize(width, height);
        self.recomposite();

        if self.history.is_empty() && self.display.is_allocated() {
            self.record_history();
        }
    }

    /// Flatten the visible layers and encode them as PNG
    pub fn export_image(&self) -> Result<ExportedImage, SessionError> {
        self.ensure_allocated("export")?;
        let flattened = compositor::flatten(self.layers.layers(), self.width(), self.height());
        let png = flattened.encode_png()?;
        tracing::info!("Exported {}x{} image ({} bytes)", self.width(), self.height(), png.len());
        Ok(ExportedImage {
            png,
            width: self.width(),
            height: self.height(),
        })
    }

    // Keyboard

    /// Run the command bound to a key press, if any
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Result<Option<Command>, SessionError> {
        let Some(command) = Command::from_key(key, modifiers) else {
            return Ok(None);
        };
        self.execute(command)?;
        Ok(Some(command))
    }

    pub fn execute(&mut self, command: Command) -> Result<HistoryStatus, SessionError> {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Clear => self.clear_canvas(),
        }
    }

    // Internals

    fn ensure_allocated(&self, what: &'static str) -> Result<(), SessionError> {
        if self.display.is_allocated() {
            Ok(())
        } else {
            tracing::warn!("Ignoring {}: viewport has not been sized", what);
            Err(SessionError::ResourceUnavailable("drawing surface is not initialized"))
        }
    }

    fn commit_gesture(&mut self, at: Option<Point>) {
        let target = self.layers.active_mut().surface_mut();
        let Some(gesture) = self.renderer.finish(target, at) else {
            return;
        };
        tracing::debug!("Committed {:?} gesture with {} points", gesture.kind, gesture.points.len());

        self.recomposite();
        self.record_history();
    }

    /// Commit any in-progress gesture at its last point
    fn flush_gesture(&mut self) {
        if self.renderer.is_drawing() {
            self.commit_gesture(None);
        }
    }

    fn recomposite(&mut self) {
        compositor::render(self.layers.layers(), &mut self.display);
    }

    /// Recomposite, keeping a live shape preview on top
    fn refresh_display(&mut self) {
        self.recomposite();
        if let crate::GestureState::Drawing(gesture) = self.renderer.state() {
            if let crate::ToolKind::Shape(kind) = gesture.kind {
                self.display
                    .draw_shape(kind, gesture.start, gesture.last(), gesture.width, gesture.color);
            }
        }
    }

    fn record_history(&mut self) {
        let entry = HistoryEntry::capture(self.config.history_mode, &self.layers, &self.display);
        tracing::debug!("Recording history entry ({} bytes)", entry.byte_len());
        self.history.record(entry);
        self.history_changed();
    }

    fn layers_changed(&mut self) -> LayerPanel {
        let panel = self.layer_panel();
        self.events.push(SessionEvent::LayersChanged(panel.clone()));
        self.events.push(SessionEvent::HistoryChanged(self.history.status()));
        panel
    }

    fn history_changed(&mut self) -> HistoryStatus {
        let status = self.history.status();
        self.events.push(SessionEvent::HistoryChanged(status));
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(width: u32, height: u32) -> Session {
        Session::new(SessionConfig::with_viewport(width, height))
    }

    #[test]
    fn test_new_session_records_blank_canvas() {
        let session = session(32, 32);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history_status(), HistoryStatus::default());
        assert_eq!(session.layers().len(), 1);
        assert!(session.display().is_blank());
    }

    #[test]
    fn test_unsized_session_refuses_drawing() {
        let mut session = session(0, 0);
        assert!(session.history().is_empty());
        assert!(matches!(
            session.pointer_down(1.0, 1.0),
            Err(SessionError::ResourceUnavailable(_))
        ));
        assert!(!session.is_drawing());
        assert!(session.export_image().is_err());

        session.resize(16, 16);
        assert_eq!(session.history().len(), 1);
        session.pointer_down(8.0, 8.0).unwrap();
        session.pointer_up(8.0, 8.0).unwrap();
        assert!(session.history_status().can_undo);
    }

    #[test]
    fn test_shape_preview_only_on_display() {
        let mut session = session(40, 40);
        session.set_tool(Tool::Circle);
        session.set_brush_size(2);
        session.pointer_down(20.0, 20.0).unwrap();
        session.pointer_move(30.0, 20.0).unwrap();

        assert!(session.layers().active().surface().is_blank());
        assert!(!session.display().is_blank());
        assert_eq!(session.history().len(), 1);

        session.pointer_up(30.0, 20.0).unwrap();
        assert!(!session.layers().active().surface().is_blank());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_pointer_leave_commits_brush() {
        let mut session = session(20, 20);
        session.pointer_down(2.0, 2.0).unwrap();
        session.pointer_move(15.0, 15.0).unwrap();
        session.pointer_leave().unwrap();

        assert!(!session.is_drawing());
        assert_eq!(session.history_status(), HistoryStatus { can_undo: true, can_redo: false });
        session.pointer_leave().unwrap();
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_resize_mid_gesture_commits_first() {
        let mut session = session(20, 20);
        session.set_tool(Tool::Line);
        session.pointer_down(1.0, 5.0).unwrap();
        session.pointer_move(15.0, 5.0).unwrap();
        session.resize(30, 30);

        assert!(!session.is_drawing());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.layers().active().surface().width(), 30);
        assert!(session.layers().active().surface().pixel(8, 5).is_some_and(|c| c.a == 255));
    }

    #[test]
    fn test_toggle_and_select_unknown_are_silent() {
        let mut session = session(10, 10);
        let before = session.layer_panel();
        let ghost = LayerId::new(404);
        assert_eq!(session.toggle_visibility(ghost), before);
        assert_eq!(session.select_layer(ghost), before);
    }

    #[test]
    fn test_delete_last_layer_is_refused() {
        let mut session = session(10, 10);
        let only = session.layer_panel().active_layer_id;
        assert!(matches!(
            session.delete_layer(only),
            Err(SessionError::InvariantViolation(_))
        ));
        assert_eq!(session.layers().len(), 1);
    }

    #[test]
    fn test_refused_delete_still_reports_panel() {
        let mut session = session(10, 10);
        let only = session.layer_panel().active_layer_id;
        session.take_events();

        assert!(session.delete_layer(only).is_err());
        let events = session.take_events();
        assert_eq!(
            events,
            vec![
                SessionEvent::LayersChanged(session.layer_panel()),
                SessionEvent::HistoryChanged(HistoryStatus::default()),
            ]
        );
    }

    #[test]
    fn test_select_unknown_keeps_gesture_alive() {
        let mut session = session(20, 20);
        session.set_tool(Tool::Rectangle);
        session.pointer_down(2.0, 2.0).unwrap();
        session.pointer_move(15.0, 15.0).unwrap();

        session.select_layer(LayerId::new(404));
        assert!(session.is_drawing());
        assert_eq!(session.history().len(), 1);
        assert!(session.layers().active().surface().is_blank());

        session.pointer_up(15.0, 15.0).unwrap();
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_events_are_queued() {
        let mut session = session(10, 10);
        session.take_events();

        let panel = session.add_layer();
        let events = session.take_events();
        assert!(events.contains(&SessionEvent::LayersChanged(panel)));
        assert!(session.take_events().is_empty());

        session.pointer_down(5.0, 5.0).unwrap();
        session.pointer_up(5.0, 5.0).unwrap();
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::HistoryChanged(HistoryStatus { can_undo: true, can_redo: false })]
        );
    }

    #[test]
    fn test_undo_across_layers_restores_each_layer() {
        let mut session = session(20, 20);
        let first = session.layer_panel().active_layer_id;
        session.set_brush_size(6);
        session.pointer_down(5.0, 5.0).unwrap();
        session.pointer_up(5.0, 5.0).unwrap();

        session.add_layer();
        session.pointer_down(15.0, 15.0).unwrap();
        session.pointer_up(15.0, 15.0).unwrap();

        session.select_layer(first);
        session.undo().unwrap();

        let layers = session.layers().layers();
        assert!(!layers[0].surface().is_blank());
        assert!(layers[1].surface().is_blank());
    }

    #[test]
    fn test_flattened_mode_restores_into_active_layer() {
        let config = SessionConfig {
            history_mode: HistoryMode::FlattenedActive,
            ..SessionConfig::with_viewport(20, 20)
        };
        let mut session = Session::new(config);
        session.set_brush_size(6);
        session.pointer_down(5.0, 5.0).unwrap();
        session.pointer_up(5.0, 5.0).unwrap();

        session.add_layer();
        session.pointer_down(15.0, 15.0).unwrap();
        session.pointer_up(15.0, 15.0).unwrap();

        let first = session.layers().layers()[0].id();
        session.select_layer(first);
        session.undo().unwrap();

        // The previous composite overwrites the first layer; the second
        // layer keeps its own pixels.
        let layers = session.layers().layers();
        assert!(layers[0].surface().pixel(5, 5).is_some_and(|c| c.a == 255));
        assert!(layers[1].surface().pixel(15, 15).is_some_and(|c| c.a == 255));
    }

    #[test]
    fn test_keyboard_shortcuts_drive_history() {
        let mut session = session(10, 10);
        session.pointer_down(5.0, 5.0).unwrap();
        session.pointer_up(5.0, 5.0).unwrap();

        assert_eq!(session.handle_key(Key::Char('z'), Modifiers::CTRL), Ok(Some(Command::Undo)));
        assert!(session.display().is_blank());
        assert_eq!(session.handle_key(Key::Char('y'), Modifiers::CTRL), Ok(Some(Command::Redo)));
        assert!(!session.display().is_blank());
        assert_eq!(session.handle_key(Key::Delete, Modifiers::CTRL), Ok(Some(Command::Clear)));
        assert!(session.display().is_blank());
        assert_eq!(session.handle_key(Key::Char('q'), Modifiers::CTRL), Ok(None));
    }

    #[test]
    fn test_history_limit() {
        let config = SessionConfig {
            max_history_entries: Some(3),
            ..SessionConfig::with_viewport(10, 10)
        };
        let mut session = Session::new(config);
        for i in 0..5 {
            let x = i as f32 * 2.0;
            session.pointer_down(x, x).unwrap();
            session.pointer_up(x, x).unwrap();
        }
        assert_eq!(session.history().len(), 3);
        session.undo().unwrap();
        session.undo().unwrap();
        assert!(!session.history_status().can_undo);
        assert!(!session.display().is_blank());
    }
}
