pub mod animation;
pub mod buffer;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;

pub use animation::AnimationState;
pub use buffer::{Buffer, Cell};
pub use element::{Content, Element};
pub use event::{Event, Key, Modifiers};
pub use hit::hit_test;
pub use layout::{LayoutResult, Rect};
pub use terminal::Terminal;
pub use transitions::{Easing, Interval, TransitionConfig};
pub use types::*;
