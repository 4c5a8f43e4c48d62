pub mod bootstrap;
pub mod orchestrator_routes;
pub mod routes;
pub mod server;
