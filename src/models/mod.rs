//! Domain models shared by the API, renderer and dispatcher.

mod alert;
mod notification;

pub use alert::{AlertEvent, AlertGroup, AlertStatus, LabelSet, value_as_text};
pub use notification::{DispatchOutcome, DispatchReport, NotificationMessage};
