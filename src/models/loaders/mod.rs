pub mod plan_loader;

pub use plan_loader::load_dispatch_plan;
