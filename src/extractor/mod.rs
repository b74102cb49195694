pub mod models;
pub mod normalize;
pub mod rapidapi;
pub mod traits;
pub mod video_id;

pub use models::{MediaFormat, RawFormat, RawFormatDocument};
pub use normalize::normalize;
pub use rapidapi::RapidApiClient;
pub use traits::FormatSource;
pub use video_id::{extract, VideoReference};
