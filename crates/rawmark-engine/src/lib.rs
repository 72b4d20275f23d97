pub mod block;
pub mod markup;
pub mod timers;
pub mod tool;
pub mod view;

// Re-export key types for easier usage
pub use block::{BlockConfig, Mode, RawBlock, RawBlockData, RENDER_SETTLE, RESIZE_DEBOUNCE};
pub use timers::{TimerId, Timers};
pub use tool::{BlockTool, HostApi, SanitizeConfig, SanitizeRule, StyleClasses, ToolboxEntry};
pub use view::{Action, NodeId, Tag, ViewEvent, ViewTree};
