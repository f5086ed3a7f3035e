pub(crate) mod correspondence;
pub(crate) mod interp;
