pub(crate) mod grid;
pub(crate) mod history;
pub(crate) mod session;
pub(crate) mod spawn;
