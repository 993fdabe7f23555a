//! Ports - Interfaces the application layer depends on

mod source_gateway_port;

#[cfg(test)]
pub use source_gateway_port::MockSourceGatewayPort;
pub use source_gateway_port::SourceGatewayPort;
