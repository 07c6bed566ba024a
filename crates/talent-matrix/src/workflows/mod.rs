pub mod assessment;
pub mod change_requests;
pub mod competencies;
pub mod employees;
pub mod learning_paths;
