pub(crate) mod buffer;
pub(crate) mod decode;
pub(crate) mod snapshot;
