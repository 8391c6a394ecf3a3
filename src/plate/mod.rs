//! Plate model: grid state, pointer selection and layered redraw.
//!
//! `PlateModel` owns a [`Behavior`] of [`PlateState`] and a painter holding
//! the four layer surfaces. Every state replacement is pushed synchronously
//! to distinct-filtered redraw subscriptions, one per layer, registered at
//! mount through the model's [`ReactiveModel`].

mod pointer;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

pub use pointer::{release, Drag, PointerTracker};

use crate::layout::{CanvasMetrics, Container, ContainerRect};
use crate::reactive::{Behavior, Lifecycle, ReactiveModel};
use crate::render::{DrawSurface, Layer, LayerSet, PlatePainter};
use crate::types::{
    Dimensions, PlateConfig, PlateSelection, PlateState, PlateUpdate, WellCoords,
};

/// Interactive plate bound to one set of layer surfaces.
pub struct PlateModel<S: DrawSurface + 'static> {
    reactive: ReactiveModel,
    state: Behavior<PlateState>,
    painter: Rc<RefCell<PlatePainter<S>>>,
    container: Option<Box<dyn Container>>,
    pointer: RefCell<PointerTracker>,
}

impl<S: DrawSurface + 'static> PlateModel<S> {
    /// Empty plate with the default visual configuration.
    pub fn new(dimensions: Dimensions, layers: LayerSet<S>) -> Self {
        Self::with_config(dimensions, layers, PlateConfig::default())
    }

    pub fn with_config(dimensions: Dimensions, layers: LayerSet<S>, config: PlateConfig) -> Self {
        Self {
            reactive: ReactiveModel::new(),
            state: Behavior::new(PlateState::empty(dimensions)),
            painter: Rc::new(RefCell::new(PlatePainter::new(layers, config))),
            container: None,
            pointer: RefCell::new(PointerTracker::default()),
        }
    }

    // ---- state -------------------------------------------------------------

    /// Current snapshot.
    pub fn state(&self) -> Rc<PlateState> {
        self.state.get()
    }

    /// The observable state, for external subscribers.
    pub fn behavior(&self) -> &Behavior<PlateState> {
        &self.state
    }

    pub fn selection(&self) -> PlateSelection {
        self.state.get().selection.clone()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.state.get().dimensions
    }

    /// Replace the state with `next` merged over the current snapshot.
    ///
    /// A dimension change recomputes well metrics before subscribers run, so
    /// every redraw sees geometry matching the new grid.
    pub fn update(&self, next: PlateUpdate) {
        let current = self.state.get();
        if let Some(dimensions) = next.dimensions {
            if dimensions != current.dimensions {
                let size = self.container_rect();
                self.painter.borrow_mut().set_geometry(size, dimensions);
            }
        }
        self.state.set(current.merged(next));
    }

    // ---- geometry & layers -------------------------------------------------

    pub fn config(&self) -> Ref<'_, PlateConfig> {
        Ref::map(self.painter.borrow(), PlatePainter::config)
    }

    /// Well size in pixels; zero while unmounted.
    pub fn metrics(&self) -> CanvasMetrics {
        self.painter.borrow().metrics()
    }

    pub fn layer(&self, layer: Layer) -> Ref<'_, S> {
        Ref::map(self.painter.borrow(), |painter| painter.layer(layer))
    }

    pub fn layer_mut(&self, layer: Layer) -> RefMut<'_, S> {
        RefMut::map(self.painter.borrow_mut(), |painter| painter.layer_mut(layer))
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    fn container_rect(&self) -> Option<ContainerRect> {
        self.container.as_ref().map(|c| c.bounding_rect())
    }

    /// Well under a client-space pointer position, if mounted.
    pub fn well_at(&self, client_x: f64, client_y: f64) -> Option<WellCoords> {
        let size = self.container_rect()?;
        let painter = self.painter.borrow();
        painter
            .metrics()
            .well_at(client_x, client_y, size, painter.config())
    }

    // ---- lifecycle ---------------------------------------------------------

    /// Attach to a live container: size the layers, draw them, and start
    /// redrawing on state changes. Ignored if already mounted.
    pub fn mount_container(&mut self, container: Box<dyn Container>) {
        if self.is_mounted() {
            log::warn!("plate already mounted; ignoring second mount");
            return;
        }

        // Subscribed before the container is set: the initial delivery only
        // seeds each distinct filter, and the resize below draws once.
        // Every layer depends on the grid shape, so a reshape redraws all.
        let painter = Rc::clone(&self.painter);
        self.reactive.subscribe_distinct(
            &self.state,
            |a, b| a.dimensions == b.dimensions,
            move |state| painter.borrow_mut().draw_grid(state),
        );
        let painter = Rc::clone(&self.painter);
        self.reactive.subscribe_distinct(
            &self.state,
            |a, b| a.dimensions == b.dimensions && a.highlight == b.highlight,
            move |state| painter.borrow_mut().draw_highlight(state),
        );
        let painter = Rc::clone(&self.painter);
        self.reactive.subscribe_distinct(
            &self.state,
            |a, b| a.dimensions == b.dimensions && a.selection == b.selection,
            move |state| painter.borrow_mut().draw_selection(state),
        );
        let painter = Rc::clone(&self.painter);
        self.reactive.subscribe_distinct(
            &self.state,
            |a, b| a.dimensions == b.dimensions && a.colors == b.colors && a.labels == b.labels,
            move |state| painter.borrow_mut().draw_wells(state),
        );

        self.container = Some(container);
        self.handle_resize();
        log::debug!("plate mounted: {:?}", self.dimensions());
    }

    /// Resize every layer buffer to the container and redraw all of them.
    pub fn handle_resize(&self) {
        let Some(size) = self.container_rect() else {
            return;
        };
        let state = self.state.get();
        let mut painter = self.painter.borrow_mut();
        painter.set_geometry(Some(size), state.dimensions);
        painter.resize_surfaces();
        painter.draw_all(&state);
    }

    // ---- pointer -----------------------------------------------------------
    //
    // The tracker borrow is never held across an `update`: subscribers may
    // call back into the model.

    pub fn is_dragging(&self) -> bool {
        self.pointer.borrow().is_dragging()
    }

    pub fn pointer(&self) -> Ref<'_, PointerTracker> {
        self.pointer.borrow()
    }

    pub fn pointer_enter(&self) {
        self.pointer.borrow_mut().inside = true;
    }

    /// Leaving the container drops the hover preview unless dragging.
    pub fn pointer_leave(&self) {
        let dragging = {
            let mut pointer = self.pointer.borrow_mut();
            pointer.inside = false;
            pointer.is_dragging()
        };
        if !dragging {
            self.set_highlight(PlateSelection::empty(self.dimensions()));
        }
    }

    /// Track the pointer. Returns whether the movement belongs to this plate
    /// (hovering or dragging), in which case the host should prevent the
    /// default action.
    pub fn pointer_move(&self, client_x: f64, client_y: f64) -> bool {
        if !self.pointer.borrow().captures_movement() {
            self.set_highlight(PlateSelection::empty(self.dimensions()));
            return false;
        }

        let Some(coords) = self.well_at(client_x, client_y) else {
            return true;
        };
        let anchor = {
            let mut pointer = self.pointer.borrow_mut();
            pointer.last = coords;
            pointer.drag().map(|drag| drag.anchor)
        };

        let dimensions = self.dimensions();
        let highlight = match anchor {
            Some(anchor) => PlateSelection::rect(dimensions, anchor, coords),
            None if dimensions.contains(coords) => PlateSelection::rect(dimensions, coords, coords),
            None => PlateSelection::empty(dimensions),
        };
        self.set_highlight(highlight);
        true
    }

    /// Start a drag: clear the committed selection and preview the anchor
    /// well.
    pub fn pointer_down(&self, client_x: f64, client_y: f64) {
        let dimensions = self.dimensions();
        let previous_selection = self.selection();
        self.update(PlateUpdate::default().selection(PlateSelection::empty(dimensions)));

        let well = self.well_at(client_x, client_y);
        let anchor = {
            let mut pointer = self.pointer.borrow_mut();
            let anchor = well.unwrap_or(pointer.last);
            pointer.last = anchor;
            pointer.drag = Some(Drag {
                anchor,
                previous_selection,
            });
            anchor
        };
        self.update(PlateUpdate::default().highlight(PlateSelection::rect(dimensions, anchor, anchor)));
    }

    /// Finish a drag: commit the highlight (or toggle a single well off) and
    /// clear the preview. No-op when not dragging.
    pub fn pointer_up(&self) {
        let Some(drag) = self.pointer.borrow_mut().drag.take() else {
            return;
        };
        let state = self.state.get();
        match release(&drag, &state.highlight) {
            Some(selection) => {
                log::debug!("plate selection committed: {} wells", selection.count());
                self.update(PlateUpdate::default().selection(selection));
            }
            None => log::debug!("plate selection toggled off"),
        }
        self.update(PlateUpdate::default().highlight(PlateSelection::empty(state.dimensions)));
    }

    fn set_highlight(&self, highlight: PlateSelection) {
        if self.state.get().highlight != highlight {
            self.update(PlateUpdate::default().highlight(highlight));
        }
    }
}

impl<S: DrawSurface + 'static> Lifecycle for PlateModel<S> {
    type Target = Box<dyn Container>;

    fn reactive(&mut self) -> &mut ReactiveModel {
        &mut self.reactive
    }

    fn mount(&mut self, target: Box<dyn Container>) {
        self.mount_container(target);
    }

    /// Release every subscription and listener, forget the container and
    /// reset pointer state. Safe to call repeatedly.
    fn dispose(&mut self) {
        self.reactive.dispose();
        if self.container.take().is_some() {
            log::debug!("plate disposed");
        }
        self.pointer.replace(PointerTracker::default());
        let dimensions = self.dimensions();
        self.painter.borrow_mut().set_geometry(None, dimensions);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    fn plate(rows: u32, cols: u32) -> PlateModel<RecordingSurface> {
        PlateModel::new(
            Dimensions::new(rows, cols),
            LayerSet::new_with(|_| RecordingSurface::new()),
        )
    }

    #[test]
    fn test_unmounted_metrics_are_zero() {
        let model = plate(2, 2);
        assert_eq!(model.metrics(), CanvasMetrics::ZERO);
        assert_eq!(model.well_at(10.0, 10.0), None);
        assert!(!model.is_mounted());
    }

    #[test]
    fn test_unmounted_update_draws_nothing() {
        let model = plate(2, 2);
        model.update(PlateUpdate::default().colors(vec![Some("red".into()); 4]));
        for layer in Layer::ALL {
            assert!(model.layer(layer).ops().is_empty());
        }
    }

    #[test]
    fn test_mount_sizes_and_draws_every_layer() {
        let mut model = plate(2, 4);
        model.mount(Box::new(ContainerRect::new(0.0, 0.0, 146.0, 86.0)));
        assert!(model.is_mounted());
        assert_eq!(model.metrics(), CanvasMetrics { dx: 30.0, dy: 30.0 });
        for layer in Layer::ALL {
            let surface = model.layer(layer);
            assert_eq!(surface.width(), 146.0);
            assert_eq!(surface.height(), 86.0);
        }
    }

    #[test]
    fn test_second_mount_is_ignored() {
        let mut model = plate(2, 2);
        model.mount(Box::new(ContainerRect::new(0.0, 0.0, 100.0, 100.0)));
        let pending = model.reactive().pending_disposals();
        model.mount(Box::new(ContainerRect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(model.reactive().pending_disposals(), pending);
        assert_eq!(model.layer(Layer::Grid).width(), 100.0);
    }

    #[test]
    fn test_dimension_change_recomputes_metrics() {
        let mut model = plate(2, 4);
        model.mount(Box::new(ContainerRect::new(0.0, 0.0, 146.0, 86.0)));
        model.update(PlateUpdate::default().dimensions(Dimensions::new(4, 8)));
        assert_eq!(model.metrics(), CanvasMetrics { dx: 15.0, dy: 15.0 });
    }
}
