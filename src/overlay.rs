pub(crate) mod blend;
pub(crate) mod compositor;
pub(crate) mod geometry;
pub(crate) mod raster;
