pub mod color_map;
pub mod curve;
pub mod raster;
pub mod value;
pub mod view;
