//! Headless runtime for the job board client.
//!
//! Front-ends drive an [`App`]: they navigate, dispatch [`Action`]s and
//! display the toasts and view state it exposes. Rendering is left entirely
//! to the front-end.

mod app;
pub mod effects;
pub mod format;
pub mod forms;
pub mod navigator;
pub mod toast;
pub mod views;

pub use app::{Action, App};
pub use effects::AppEffect;
pub use navigator::{NavMode, Navigator};
pub use toast::{Toast, ToastKind, Toasts};
pub use views::View;
