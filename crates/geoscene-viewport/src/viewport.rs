//! Viewport controller for pan and zoom over a scene.
//!
//! The visible window is a rectangle in scene space (the SVG `viewBox`).
//! Pixel coordinates are relative to the widget's top-left corner; client
//! coordinates are page-relative and become widget-local by subtracting the
//! widget origin.

use std::fmt;
use std::sync::{Arc, Weak};

use geoscene_core::BoundingBox;
use geoscene_render::Scene;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Wheel zoom parameters.
///
/// One wheel event zooms by `base^(-delta_y * scale)`, clamped to
/// `[min_zoom, max_zoom]`. Negative `delta_y` (wheel up) zooms in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomOptions {
    pub base: f64,
    pub scale: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            base: 1.05,
            scale: 0.01,
            min_zoom: 0.1,
            max_zoom: 3.0,
        }
    }
}

impl ZoomOptions {
    /// Zoom factor for one wheel event, before clamping.
    pub fn factor(&self, delta_y: f64) -> f64 {
        self.base.powf(-delta_y * self.scale)
    }

    /// Whether the options give a finite positive factor and a non-empty
    /// clamp range.
    pub fn is_valid(&self) -> bool {
        self.base.is_finite()
            && self.base > 0.0
            && self.scale.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom
            && self.max_zoom.is_finite()
    }
}

fn is_usable_extent(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Pointer drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging with the last seen pointer position in client pixels.
    Dragging { anchor: (f64, f64) },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Input events the controller reacts to. Positions are client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        x: f64,
        y: f64,
        button: PointerButton,
    },
    Move {
        x: f64,
        y: f64,
        primary_held: bool,
    },
    Release,
    Leave,
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
}

/// Pan/zoom state for one widget.
#[derive(Debug, Clone)]
pub struct ViewportController {
    view: BoundingBox,
    pixel_width: f64,
    pixel_height: f64,
    widget_origin: (f64, f64),
    zoom: f64,
    drag: DragState,
    options: ZoomOptions,
    bound_scene: Option<Weak<Scene>>,
}

impl ViewportController {
    /// Creates a controller showing `initial` in a widget of the given size.
    ///
    /// A zero, negative or non-finite pixel extent is replaced by 1.
    pub fn new(pixel_width: f64, pixel_height: f64, initial: BoundingBox) -> Self {
        let mut controller = Self {
            view: initial,
            pixel_width: 1.0,
            pixel_height: 1.0,
            widget_origin: (0.0, 0.0),
            zoom: 1.0,
            drag: DragState::Idle,
            options: ZoomOptions::default(),
            bound_scene: None,
        };
        controller.set_widget_size(pixel_width, pixel_height);
        controller
    }

    /// Replaces the wheel zoom parameters. Invalid options are ignored.
    pub fn with_zoom_options(mut self, options: ZoomOptions) -> Self {
        if options.is_valid() {
            self.options = options;
        } else {
            debug!("Ignoring invalid zoom options {:?}", options);
        }
        self
    }

    pub fn zoom_options(&self) -> &ZoomOptions {
        &self.options
    }

    /// The visible window in scene space.
    pub fn view_rect(&self) -> BoundingBox {
        self.view
    }

    /// The visible window as `(x, y, width, height)`.
    pub fn view_box(&self) -> (f64, f64, f64, f64) {
        self.view.to_tuple()
    }

    /// The visible window formatted as an SVG `viewBox` attribute.
    pub fn view_box_string(&self) -> String {
        self.view.to_string()
    }

    /// Transient zoom scalar; 1.0 between events.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn pixel_size(&self) -> (f64, f64) {
        (self.pixel_width, self.pixel_height)
    }

    /// Sets the widget size (typically called when the window resizes).
    ///
    /// Each extent must be finite and positive; others leave that extent
    /// unchanged.
    pub fn set_widget_size(&mut self, width: f64, height: f64) {
        if is_usable_extent(width) {
            self.pixel_width = width;
        }
        if is_usable_extent(height) {
            self.pixel_height = height;
        }
    }

    /// Sets the page position of the widget's top-left corner.
    pub fn set_widget_origin(&mut self, x: f64, y: f64) {
        self.widget_origin = (x, y);
    }

    fn units_per_pixel(&self) -> (f64, f64) {
        (
            self.view.width / self.pixel_width,
            self.view.height / self.pixel_height,
        )
    }

    /// Converts widget-local pixel coordinates to scene coordinates.
    pub fn pixel_to_scene(&self, pixel_x: f64, pixel_y: f64) -> (f64, f64) {
        let (ux, uy) = self.units_per_pixel();
        (self.view.x + pixel_x * ux, self.view.y + pixel_y * uy)
    }

    /// Converts scene coordinates to widget-local pixel coordinates.
    pub fn scene_to_pixel(&self, scene_x: f64, scene_y: f64) -> (f64, f64) {
        (
            (scene_x - self.view.x) * self.pixel_width / self.view.width,
            (scene_y - self.view.y) * self.pixel_height / self.view.height,
        )
    }

    /// Starts a drag on primary press. Other buttons are ignored.
    pub fn press(&mut self, x: f64, y: f64, button: PointerButton) {
        if button == PointerButton::Primary {
            trace!("Drag start at ({}, {})", x, y);
            self.drag = DragState::Dragging { anchor: (x, y) };
        }
    }

    /// Pans by the pointer movement since the last event while dragging.
    ///
    /// A move that arrives without the primary button held means the press
    /// was lost outside the widget; the drag ends without panning.
    pub fn pointer_move(&mut self, x: f64, y: f64, primary_held: bool) {
        let DragState::Dragging { anchor } = self.drag else {
            return;
        };
        if !primary_held {
            trace!("Primary released outside widget, drag cancelled");
            self.drag = DragState::Idle;
            return;
        }

        let (ux, uy) = self.units_per_pixel();
        self.view.x -= (x - anchor.0) * ux;
        self.view.y -= (y - anchor.1) * uy;
        self.drag = DragState::Dragging { anchor: (x, y) };
        trace!("Pan to {}", self.view);
    }

    pub fn release(&mut self) {
        if self.is_dragging() {
            trace!("Drag end");
        }
        self.drag = DragState::Idle;
    }

    pub fn leave(&mut self) {
        self.release();
    }

    /// Zooms about the cursor.
    ///
    /// The scene point under the cursor keeps its pixel position.
    pub fn wheel(&mut self, client_x: f64, client_y: f64, delta_y: f64) {
        let local_x = client_x - self.widget_origin.0;
        let local_y = client_y - self.widget_origin.1;
        let (anchor_x, anchor_y) = self.pixel_to_scene(local_x, local_y);

        self.zoom = (self.zoom * self.options.factor(delta_y))
            .clamp(self.options.min_zoom, self.options.max_zoom);

        self.view.width /= self.zoom;
        self.view.height /= self.zoom;
        let (ux, uy) = self.units_per_pixel();
        self.view.x = anchor_x - local_x * ux;
        self.view.y = anchor_y - local_y * uy;

        trace!("Wheel {} zoom {:.4} view {}", delta_y, self.zoom, self.view);
        self.zoom = 1.0;
    }

    /// Dispatches one input event.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { x, y, button } => self.press(x, y, button),
            PointerEvent::Move { x, y, primary_held } => self.pointer_move(x, y, primary_held),
            PointerEvent::Release => self.release(),
            PointerEvent::Leave => self.leave(),
            PointerEvent::Wheel { x, y, delta_y } => self.wheel(x, y, delta_y),
        }
    }

    /// Resets the view to `bbox` expanded to a square.
    ///
    /// The square keeps the box's top-left corner; a zero-size box gets a
    /// side of 1.0. Any drag is discarded.
    pub fn reset_to_bbox(&mut self, bbox: &BoundingBox) {
        let mut square = bbox.expand_to_square();
        if square.width <= 0.0 {
            square = BoundingBox::new(bbox.x, bbox.y, 1.0, 1.0);
        }
        self.view = square;
        self.drag = DragState::Idle;
        self.zoom = 1.0;
        debug!("Viewport reset to {}", self.view);
    }

    /// Binds `scene` to this controller, resetting the view when it is not
    /// the scene bound last time. Returns whether a reset happened.
    pub fn sync_scene(&mut self, scene: &Arc<Scene>) -> bool {
        let unchanged = self
            .bound_scene
            .as_ref()
            .is_some_and(|bound| Weak::ptr_eq(bound, &Arc::downgrade(scene)));
        if unchanged {
            return false;
        }
        self.bound_scene = Some(Arc::downgrade(scene));
        self.reset_to_bbox(&scene.bbox);
        true
    }
}

impl fmt::Display for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "View: ({:.2}, {:.2}) {:.2}x{:.2} | Widget: {}x{}",
            self.view.x,
            self.view.y,
            self.view.width,
            self.view.height,
            self.pixel_width,
            self.pixel_height
        )
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(800.0, 800.0, BoundingBox::new(0.0, 0.0, 1.0, 1.0))
    }
}
