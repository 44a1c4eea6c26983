pub mod auth;
pub mod health;
pub mod students;

pub use auth::{admin_login, login, signup};
pub use health::health_check;
pub use students::{delete_student, get_my_profile, list_leaderboard, list_students_admin, update_score};
