//! Custom window chrome and the fullscreen bridge
//!
//! The controller never talks to a windowing toolkit directly; it drives a
//! [`WindowHost`], which the application implements on top of its native
//! window and title bar view.

pub mod controller;
pub mod deferred;
pub mod fullscreen;
pub mod host;
pub mod placement;
pub mod style;

#[cfg(test)]
mod testing;

pub use controller::{ChromeController, TitleBarPress};
pub use deferred::PendingTask;
pub use fullscreen::FullscreenPhase;
pub use host::WindowHost;
pub use style::{ChromeStyle, CornerRadii};
