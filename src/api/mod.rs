pub(crate) mod assignments;
pub(crate) mod errors;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod imports;
pub(crate) mod requests;
pub(crate) mod router;
pub(crate) mod shared_content;
