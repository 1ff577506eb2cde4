pub mod errors;
pub mod events;
pub mod logging;
pub mod state;
pub mod zoom;
