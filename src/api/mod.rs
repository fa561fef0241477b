pub mod alerts;

pub use alerts::{Alert, AlertLevel, Alerts};
