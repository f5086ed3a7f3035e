pub(crate) mod clip;
pub(crate) mod draw;
pub(crate) mod line;
pub(crate) mod surface;
