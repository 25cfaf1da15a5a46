// Adapters layer: concrete implementations for external systems (package database).

pub mod pacman;
