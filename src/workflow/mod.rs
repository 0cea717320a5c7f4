pub mod controller;

pub use controller::WorkflowController;
