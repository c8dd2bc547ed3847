//! Host windowing glue.

pub mod winit;
