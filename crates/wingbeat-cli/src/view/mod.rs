pub use self::flock_view::FlockView;

mod flock_view;
