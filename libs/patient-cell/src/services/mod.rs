pub mod activity;

pub use activity::PatientActivityService;
