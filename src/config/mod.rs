/// Configuration subsystem - editor options and the rc file that sets them
pub mod rc;

pub use rc::RcLoader;

use crate::controller::Mode;

/// Options fixed when an editor instance is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// When false every key is literal input and the field never leaves Insert mode
    pub vim_enabled: bool,
    pub default_mode: Mode,
    /// Maximum buffer length in chars (line breaks included), 0 for unlimited
    pub char_limit: usize,
    /// Rows the view may show, 0 for no cap
    pub max_height: usize,
    pub placeholder: String,
    /// Enter submits from Insert mode instead of splitting the line
    pub submit_in_insert: bool,
}

impl EditorConfig {
    pub fn initial_mode(&self) -> Mode {
        if self.vim_enabled {
            self.default_mode
        } else {
            Mode::Insert
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            vim_enabled: true,
            default_mode: Mode::Normal,
            char_limit: 0,
            max_height: 0,
            placeholder: String::new(),
            submit_in_insert: false,
        }
    }
}
