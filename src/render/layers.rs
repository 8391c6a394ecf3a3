//! The four stacked layers of a plate.

/// One independently redrawn drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Gridlines, border and row/column labels
    Grid,
    /// Well fill colors and labels
    Wells,
    /// Committed selection overlay
    Select,
    /// Drag/hover preview overlay
    Highlight,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Grid, Layer::Wells, Layer::Select, Layer::Highlight];

    /// Bottom-to-top DOM order: gridlines and axis labels paint over the
    /// fills and overlays.
    pub const STACK_ORDER: [Layer; 4] =
        [Layer::Wells, Layer::Select, Layer::Highlight, Layer::Grid];
}

/// One surface per [`Layer`], owned together.
#[derive(Debug, Clone, Default)]
pub struct LayerSet<S> {
    pub grid: S,
    pub wells: S,
    pub select: S,
    pub highlight: S,
}

impl<S> LayerSet<S> {
    /// Build each layer with `make`.
    pub fn new_with(mut make: impl FnMut(Layer) -> S) -> Self {
        Self {
            grid: make(Layer::Grid),
            wells: make(Layer::Wells),
            select: make(Layer::Select),
            highlight: make(Layer::Highlight),
        }
    }

    /// Build each layer with a fallible `make`, stopping at the first error.
    pub fn try_new_with<E>(mut make: impl FnMut(Layer) -> Result<S, E>) -> Result<Self, E> {
        Ok(Self {
            grid: make(Layer::Grid)?,
            wells: make(Layer::Wells)?,
            select: make(Layer::Select)?,
            highlight: make(Layer::Highlight)?,
        })
    }

    pub fn get(&self, layer: Layer) -> &S {
        match layer {
            Layer::Grid => &self.grid,
            Layer::Wells => &self.wells,
            Layer::Select => &self.select,
            Layer::Highlight => &self.highlight,
        }
    }

    pub fn get_mut(&mut self, layer: Layer) -> &mut S {
        match layer {
            Layer::Grid => &mut self.grid,
            Layer::Wells => &mut self.wells,
            Layer::Select => &mut self.select,
            Layer::Highlight => &mut self.highlight,
        }
    }

    /// Layers in stacking order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &S)> {
        Layer::STACK_ORDER
            .into_iter()
            .map(move |layer| (layer, self.get(layer)))
    }
}
