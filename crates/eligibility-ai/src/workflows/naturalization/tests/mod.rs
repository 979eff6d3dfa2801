mod common;

mod consolidation;
mod service;
