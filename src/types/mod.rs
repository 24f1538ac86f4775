mod post;
mod student;

pub use post::Post;
pub use student::Student;
