pub mod registry;
pub mod validation;

pub use registry::SlotRegistry;
pub use validation::SlotValidationService;
