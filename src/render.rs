pub(crate) mod runloop;
pub(crate) mod scheduler;
pub(crate) mod video;
