//! Viewport-aware placement of the floating layer.
//!
//! The layer opens downward unless the space below the trigger cannot hold
//! the list while the space above can (and is at least as large). The chosen
//! direction is locked for the rest of the open session, so a resize or scroll
//! while the layer is visible moves it but never flips it.

use std::fmt;

use crate::constants::{EDGE_INSET, OVERLAY_GAP, VIEWPORT_MARGIN};
use crate::layout::{Bounds, Size};

/// Which side of the trigger the layer opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Down,
    Up,
}

/// Drop shadow cast by the layer, mirrored for upward placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    pub offset_y: f32,
    pub blur: f32,
    pub alpha: f32,
}

impl BoxShadow {
    pub fn for_direction(direction: Direction) -> Self {
        let offset_y = match direction {
            Direction::Down => 4.0,
            Direction::Up => -4.0,
        };
        Self {
            offset_y,
            blur: 12.0,
            alpha: 0.15,
        }
    }
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self::for_direction(Direction::Down)
    }
}

impl fmt::Display for BoxShadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0 {}px {}px rgba(0, 0, 0, {})",
            self.offset_y, self.blur, self.alpha
        )
    }
}

/// Computed style of the floating layer (viewport coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayStyle {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub max_height: f32,
    pub box_shadow: BoxShadow,
}

/// Result of a placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Geometry was available and the style is up to date
    Placed,
    /// Something was not mounted yet; try again next frame
    Deferred,
}

/// Pick a direction for a list of `content_height` under `trigger`.
pub fn choose_direction(trigger: &Bounds, content_height: f32, viewport: Size) -> Direction {
    let space_below = viewport.height - trigger.bottom() - VIEWPORT_MARGIN;
    let space_above = trigger.top() - VIEWPORT_MARGIN;

    if space_below < content_height && space_above >= content_height && space_above >= space_below
    {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Placement state for one dropdown.
#[derive(Debug, Clone, Default)]
pub struct PositionEngine {
    locked: Option<Direction>,
    style: OverlayStyle,
    is_ready: bool,
    /// Explicit layer width, otherwise the trigger width
    width: Option<f32>,
    max_list_height: f32,
}

impl PositionEngine {
    pub fn new(width: Option<f32>, max_list_height: f32) -> Self {
        Self {
            width,
            max_list_height,
            ..Self::default()
        }
    }

    /// Direction of the current session (Down until the first placement).
    pub fn direction(&self) -> Direction {
        self.locked.unwrap_or_default()
    }

    pub fn locked_direction(&self) -> Option<Direction> {
        self.locked
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// True once a placement succeeded in this session.
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Compute the layer style. Safe to call repeatedly; returns `Deferred`
    /// without touching state when the trigger or layer cannot be measured.
    pub fn calculate(
        &mut self,
        trigger: Option<Bounds>,
        content_height: Option<f32>,
        viewport: Size,
    ) -> PlacementOutcome {
        let (Some(trigger), Some(content_height)) = (trigger, content_height) else {
            return PlacementOutcome::Deferred;
        };
        if !trigger.is_measurable()
            || !content_height.is_finite()
            || !(viewport.width > 0.0 && viewport.height > 0.0)
        {
            return PlacementOutcome::Deferred;
        }

        let content_height = content_height.max(0.0).min(self.max_list_height);
        let direction = match self.locked {
            Some(direction) => direction,
            None => {
                let direction = choose_direction(&trigger, content_height, viewport);
                log::debug!(
                    "Placement: locked {:?} (content {:.0}px, trigger y={:.0}, viewport h={:.0})",
                    direction,
                    content_height,
                    trigger.y,
                    viewport.height
                );
                self.locked = Some(direction);
                direction
            }
        };

        let available = match direction {
            Direction::Down => viewport.height - trigger.bottom() - VIEWPORT_MARGIN - OVERLAY_GAP,
            Direction::Up => trigger.top() - VIEWPORT_MARGIN - OVERLAY_GAP,
        };
        let max_height = content_height.min(available).max(0.0);
        let top = match direction {
            Direction::Down => trigger.bottom() + OVERLAY_GAP,
            Direction::Up => trigger.top() - OVERLAY_GAP - max_height,
        };

        let max_width = (viewport.width - 2.0 * EDGE_INSET).max(0.0);
        let width = self.width.unwrap_or(trigger.width).min(max_width);
        let mut left = trigger.left();
        if left + width > viewport.width - EDGE_INSET {
            left = viewport.width - EDGE_INSET - width;
        }
        if left < EDGE_INSET {
            left = EDGE_INSET;
        }

        self.style = OverlayStyle {
            left,
            top,
            width,
            max_height,
            box_shadow: BoxShadow::for_direction(direction),
        };
        self.is_ready = true;
        PlacementOutcome::Placed
    }

    /// Forget the session: unlock the direction and drop readiness.
    pub fn reset(&mut self) {
        self.locked = None;
        self.is_ready = false;
        self.style = OverlayStyle::default();
    }
}
