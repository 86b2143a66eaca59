pub mod contact;
pub mod flow;
pub mod launcher;
pub mod selection;

pub use contact::ContactForm;
pub use flow::{BookingFlow, SubmissionTicket};
pub use launcher::BookingLauncher;
pub use selection::SelectionState;
