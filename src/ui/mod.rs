pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, menu_item, prompt, rule, success, warn};
pub use table::movie_table;
pub use theme::{theme, Theme};
