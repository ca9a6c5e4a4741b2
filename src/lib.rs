// Library for tests to access modules

pub mod bandwidth;
pub mod config;
pub mod host_client;
pub mod merge;
pub mod models;
pub mod namespace;
pub mod pipeline;
pub mod poller;
pub mod routes;
pub mod surface;
pub mod uplink;
