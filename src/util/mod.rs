// Utility Module
// Configuration shared by key generation and the demo binary

pub mod config;
