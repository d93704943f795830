pub mod cms;
pub mod resume;
pub mod template;
pub mod user;
