pub mod notify;
pub mod orchestrator;
