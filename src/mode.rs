// The current interaction mode, shown to the user on every change.

use std::fmt;

use tracing::debug;

use crate::surface::Ui;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    Drawing,
    Erasing,
    #[default]
    Inactive,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drawing => "drawing",
            Self::Erasing => "erasing",
            Self::Inactive => "inactive",
        }
    }

    /// Capitalized name for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Drawing => "Drawing",
            Self::Erasing => "Erasing",
            Self::Inactive => "Inactive",
        }
    }

    /// Style tag the UI uses to pick a look for the mode indicator.
    pub fn style_tag(&self) -> &'static str {
        match self {
            Self::Drawing => "mode drawing",
            Self::Erasing => "mode erasing",
            Self::Inactive => "mode inactive",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Default)]
pub struct ModeState {
    current: Mode,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Switch modes. Notifies `ui` and returns true only when the mode actually changed.
    pub fn set_mode(&mut self, mode: Mode, ui: &mut dyn Ui) -> bool {
        if self.current == mode {
            return false;
        }
        debug!(from = self.current.as_str(), to = mode.as_str(), "mode change");
        self.current = mode;
        ui.mode_changed(mode);
        true
    }

    /// Back to Inactive without notifying anyone.
    pub fn reset(&mut self) {
        self.current = Mode::Inactive;
    }
}
