pub mod profile;

pub use profile::PreferenceProfile;
