pub mod line_follow;

pub use line_follow::Controller;
