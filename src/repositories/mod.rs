pub(crate) mod assignments;
pub(crate) mod competencies;
pub(crate) mod relationships;
pub(crate) mod requests;
pub(crate) mod sequences;
pub(crate) mod shared_content;
pub(crate) mod submissions;
pub(crate) mod trainers;
pub(crate) mod trainings;
pub(crate) mod users;
