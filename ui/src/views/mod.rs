mod home;
pub use home::Home;

mod map;
pub use map::{DemoData, MapDemo};
