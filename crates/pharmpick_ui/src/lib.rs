//! pharmpick_ui - Headless engine for a searchable selector overlay
//!
//! The engine never draws. A host feeds it input events, geometry (through a
//! [`Surface`]) and the current time, and renders the [`DropdownView`] it
//! gets back. Every delay is a keyed timer advanced by [`Dropdown::tick`], so
//! behaviour is deterministic under a fake clock.

mod accessibility;
mod callback;
mod config;
pub mod constants;
mod dropdown;
mod error;
mod event;
mod focus;
mod hover;
mod layout;
mod lifecycle;
mod macros;
mod navigation;
mod option;
mod overflow;
mod position;
mod registry;
mod scheduler;
mod scroll_sync;
pub mod search;
mod surface;
mod text_metrics;
mod validation;
mod view;

pub use accessibility::{option_element_id, AriaAttributes};
pub use callback::{Callback, Callback0};
pub use config::{DropdownConfig, SelectionMode, Timings};
pub use dropdown::Dropdown;
pub use error::DropdownError;
pub use event::{Event, EventStatus, KeyCode, KeyModifiers, WindowEvent};
pub use focus::{FocusCoordinator, FocusOutcome, FocusTarget};
pub use hover::{HoverIntent, HoverIntentController};
pub use layout::{Bounds, Point, Size};
pub use lifecycle::{OpenCloseController, OpenState, Transition};
pub use navigation::{KeyOutcome, KeyboardNavigator, NavContext};
pub use option::{DropdownOption, OptionList, SelectionValue};
pub use overflow::{truncate_to_fit, TextOverflowManager};
pub use position::{BoxShadow, Direction, OverlayStyle, PlacementOutcome, PositionEngine};
pub use registry::{CloseFn, DropdownRegistry, InstanceId};
pub use scheduler::Scheduler;
pub use scroll_sync::{ScrollMetrics, ScrollSync};
pub use search::{SearchFilterEngine, SearchStatus};
pub use surface::{HeadlessSurface, Surface};
pub use text_metrics::{ApproxMeasurer, CosmicMeasurer, FontStyle, TextMeasurer};
pub use validation::Validation;
pub use view::{DropdownView, EmptyState, OverlayView, RowView, SearchView, TriggerView};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Bounds, Dropdown, DropdownConfig, DropdownOption, DropdownRegistry, DropdownView, Event,
        EventStatus, HeadlessSurface, KeyCode, KeyModifiers, OpenState, OptionList, Point,
        SearchStatus, SelectionMode, SelectionValue, Size, Surface, WindowEvent,
    };
}
