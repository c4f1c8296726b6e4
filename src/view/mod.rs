pub mod state;

pub use state::{Activity, ViewState};
