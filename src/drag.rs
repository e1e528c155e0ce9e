//! Drag gesture state and reorder helpers shared by the dashboard grid and the
//! holdings table header.

/// Default share of an item's width that acts as a before/after drop zone.
pub const DEFAULT_DROP_ZONE_RATIO: f32 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
}

/// Hint showing where the dragged item would land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropIndicator {
    pub over_id: String,
    pub position: DropPosition,
}

/// Horizontal extent of a rendered item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemBounds {
    pub left: f32,
    pub width: f32,
}

impl ItemBounds {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

/// Pointer-position query the host answers for the items it has drawn.
pub trait ItemGeometry {
    fn bounds_of(&self, id: &str) -> Option<ItemBounds>;
}

impl ItemGeometry for std::collections::HashMap<String, ItemBounds> {
    fn bounds_of(&self, id: &str) -> Option<ItemBounds> {
        self.get(id).copied()
    }
}

/// Callbacks a UI framework's drag primitives are wired to.
pub trait DragHandler {
    /// Id of the item currently being dragged, if any.
    fn lifted(&self) -> Option<&str>;
    fn on_drag_start(&mut self, active_id: &str);
    fn on_drag_over(
        &mut self,
        active_id: &str,
        over_id: Option<&str>,
        pointer_x: f32,
        geometry: &dyn ItemGeometry,
    );
    fn on_drag_end(&mut self, active_id: &str, over_id: Option<&str>);
}

/// Pointer input gathered while drawing one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragFrame {
    /// Item whose handle began a drag this frame.
    pub started: Option<String>,
    /// Item whose handle was released this frame.
    pub stopped: Option<String>,
    pub pointer_x: Option<f32>,
    /// Item under the pointer.
    pub hovered: Option<String>,
}

/// Feed one frame of pointer input to `handler`.
///
/// Returns `true` while a drag is still in progress after the frame.
pub fn dispatch_frame(
    handler: &mut dyn DragHandler,
    frame: &DragFrame,
    geometry: &dyn ItemGeometry,
) -> bool {
    if let Some(id) = &frame.started {
        handler.on_drag_start(id);
    }
    let lifted = handler.lifted().map(str::to_owned);
    if let (Some(active), Some(x)) = (&lifted, frame.pointer_x) {
        handler.on_drag_over(active, frame.hovered.as_deref(), x, geometry);
    }
    if let Some(id) = &frame.stopped {
        handler.on_drag_end(id, frame.hovered.as_deref());
        return false;
    }
    lifted.is_some()
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active_id: String,
        indicator: Option<DropIndicator>,
    },
}

/// A single active drag gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    state: DragState,
    drop_zone_ratio: f32,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DEFAULT_DROP_ZONE_RATIO)
    }
}

impl DragSession {
    pub fn new(drop_zone_ratio: f32) -> Self {
        Self {
            state: DragState::Idle,
            drop_zone_ratio: drop_zone_ratio.clamp(0.0, 0.5),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Id of the item currently lifted by the pointer.
    pub fn lifted(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { active_id, .. } => Some(active_id.as_str()),
            DragState::Idle => None,
        }
    }

    pub fn indicator(&self) -> Option<&DropIndicator> {
        match &self.state {
            DragState::Dragging { indicator, .. } => indicator.as_ref(),
            DragState::Idle => None,
        }
    }

    pub fn start(&mut self, active_id: &str) {
        self.state = DragState::Dragging {
            active_id: active_id.to_string(),
            indicator: None,
        };
    }

    /// Update the drop indicator for the item under the pointer.
    pub fn over(
        &mut self,
        active_id: &str,
        over_id: Option<&str>,
        pointer_x: f32,
        bounds: Option<ItemBounds>,
    ) -> Option<&DropIndicator> {
        let ratio = self.drop_zone_ratio;
        let DragState::Dragging { indicator, .. } = &mut self.state else {
            return None;
        };
        *indicator = match (over_id, bounds) {
            (Some(over), Some(bounds)) if over != active_id => {
                drop_indicator_for(over, pointer_x, bounds, ratio)
            }
            _ => None,
        };
        indicator.as_ref()
    }

    /// Finish the gesture, returning the id that was being dragged.
    pub fn end(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { active_id, .. } => Some(active_id),
            DragState::Idle => None,
        }
    }
}

/// Before/after hint for a pointer over `bounds`; `None` in the middle dead zone.
pub fn drop_indicator_for(
    over_id: &str,
    pointer_x: f32,
    bounds: ItemBounds,
    ratio: f32,
) -> Option<DropIndicator> {
    let relative_x = pointer_x - bounds.left;
    let threshold = bounds.width * ratio;
    let position = if relative_x < threshold {
        DropPosition::Before
    } else if relative_x > bounds.width - threshold {
        DropPosition::After
    } else {
        return None;
    };
    Some(DropIndicator {
        over_id: over_id.to_string(),
        position,
    })
}

/// Remove the element at `from` and reinsert it at `to`.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Move `active` to the index of `over` among the non-pinned items.
///
/// Pinned items keep their leading positions. Returns `false` without touching
/// `items` when either id is missing, pinned, or they are the same item.
pub fn reorder_by_id<T, K, P>(
    items: &mut Vec<T>,
    active: &str,
    over: Option<&str>,
    key: K,
    is_pinned: P,
) -> bool
where
    K: Fn(&T) -> &str,
    P: Fn(&T) -> bool,
{
    let Some(over) = over else {
        return false;
    };
    if over == active {
        return false;
    }
    let (pinned, mut movable): (Vec<T>, Vec<T>) =
        std::mem::take(items).into_iter().partition(|item| is_pinned(item));
    let from = movable.iter().position(|item| key(item) == active);
    let to = movable.iter().position(|item| key(item) == over);
    let moved = match (from, to) {
        (Some(from), Some(to)) => {
            array_move(&mut movable, from, to);
            true
        }
        _ => false,
    };
    items.extend(pinned);
    items.extend(movable);
    moved
}
