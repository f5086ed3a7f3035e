pub(crate) mod bezier;
pub(crate) mod edge;
pub(crate) mod matrix;
pub(crate) mod vector;
