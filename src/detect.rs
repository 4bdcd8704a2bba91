pub(crate) mod detector;
pub(crate) mod readiness;
pub(crate) mod worker;
