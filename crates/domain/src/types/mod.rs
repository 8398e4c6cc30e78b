//! Domain data types

pub mod course;
pub mod enrollment;
pub mod group;
pub mod page;
pub mod role;
pub mod upload;
pub mod video;

pub use course::{Course, CourseUpdate, NewCourse};
pub use enrollment::Enrollment;
pub use group::{Group, GroupUpdate, NewGroup};
pub use page::{
    paginate, total_pages_for, ListQuery, Page, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    MIN_PAGE_SIZE,
};
pub use role::{NewRole, Role, RoleUpdate};
pub use upload::FileUpload;
pub use video::{CourseVideo, NewVideo, VideoUpdate};
