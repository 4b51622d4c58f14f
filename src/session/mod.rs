pub mod store;

pub use store::{PredictionTicket, SessionStore};
