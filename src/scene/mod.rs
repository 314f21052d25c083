pub mod compiler;
pub mod spec;
