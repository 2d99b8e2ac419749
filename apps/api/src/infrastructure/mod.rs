// Infrastructure layer module
// Contains the external service integrations
// Follows Hexagonal Architecture

pub mod clients;
