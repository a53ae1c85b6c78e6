use super::*;

mod io_render;

pub(in crate::cli) use io_render::*;
