mod settings;
mod sprint;

pub use settings::Settings;
pub use sprint::{SprintDateRange, SprintPosition, SprintRecord, display_name};
