#![forbid(unsafe_code)]

pub mod assets;
pub mod repository;
pub mod seed;

pub use assets::{AssetSource, DirAssetSource, InMemoryAssets};
pub use repository::{
    CourseDetailRepository, CourseExtras, CourseRepository, InMemoryRepository,
    LearnerRepository, Storage, StorageError,
};
