mod broker_service;

pub use broker_service::*;
