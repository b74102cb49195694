pub mod controller;
pub mod state;

pub use controller::ResolutionController;
pub use state::ResolutionState;
