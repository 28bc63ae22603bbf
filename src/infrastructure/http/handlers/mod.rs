//! HTTP Handlers

mod chapter;
mod import;
mod novel;
mod ping;
mod view;
mod websocket;

pub use chapter::*;
pub use import::*;
pub use novel::*;
pub use ping::*;
pub use view::*;
pub use websocket::*;
