pub mod document;
pub mod edit;
pub mod init;
pub mod inspect;
pub mod render;
pub mod sanitize;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use render::{render, RenderArgs};
pub use sanitize::{sanitize, SanitizeArgs};
