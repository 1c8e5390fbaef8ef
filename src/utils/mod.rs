pub mod avatar;

pub use avatar::AvatarUrlHelper;
