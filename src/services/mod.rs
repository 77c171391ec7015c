// Service exports
pub mod directory;
pub mod encoder;
#[cfg(feature = "fastembed")]
pub mod fastembed_encoder;

pub use directory::{
    DirectoryError, DirectorySeed, InMemoryDirectory, MentorProfile, ProfileDirectory,
    StudentProfile,
};
pub use encoder::EncoderRuntime;
#[cfg(feature = "fastembed")]
pub use fastembed_encoder::FastEmbedEncoder;
