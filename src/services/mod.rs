pub(crate) mod grading;
pub(crate) mod import;
pub(crate) mod trainer_identity;
