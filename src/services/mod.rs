pub mod assignments;
pub mod auth;
pub mod teachers;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use teachers::TeacherService;
