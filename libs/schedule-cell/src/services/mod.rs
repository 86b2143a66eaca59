pub mod resolution;

pub use resolution::ScheduleResolver;
