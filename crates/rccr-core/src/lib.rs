mod error;
mod outcome;
mod polisher;
mod presets;
mod refiner;

pub use error::{PolishError, EMPTY_INPUT_MESSAGE};
pub use outcome::PolishOutcome;
pub use polisher::{PolishRequest, Polisher};
pub use presets::{PresetCatalog, PresetError, TaskPreset};
pub use refiner::{substitute_casual_words, TextRefiner};
