use serde::Serialize;

/// The one screen that currently owns input. `None` means the world is live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    #[default]
    None,
    Inventory,
    Workbench,
    Trade,
    LogViewer {
        entry: u32,
    },
}

impl Screen {
    pub fn is_open(self) -> bool {
        self != Screen::None
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Inventory => "inventory",
            Self::Workbench => "workbench",
            Self::Trade => "trade",
            Self::LogViewer { .. } => "log_viewer",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModalUi {
    screen: Screen,
}

impl ModalUi {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn any_open(&self) -> bool {
        self.screen.is_open()
    }

    pub fn open_inventory(&mut self) -> bool {
        self.replace_from(&[Screen::None], Screen::Inventory)
    }

    /// Workbench and trade may replace the inventory screen but never each other.
    pub fn open_workbench(&mut self) -> bool {
        self.replace_from(&[Screen::None, Screen::Inventory], Screen::Workbench)
    }

    pub fn open_trade(&mut self) -> bool {
        self.replace_from(&[Screen::None, Screen::Inventory], Screen::Trade)
    }

    /// Log viewer is only reachable from the trade screen.
    pub fn open_log_viewer(&mut self, entry: u32) -> bool {
        match self.screen {
            Screen::Trade | Screen::LogViewer { .. } => {
                self.screen = Screen::LogViewer { entry };
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) -> Screen {
        std::mem::take(&mut self.screen)
    }

    fn replace_from(&mut self, allowed: &[Screen], next: Screen) -> bool {
        if !allowed.contains(&self.screen) {
            return false;
        }
        self.screen = next;
        true
    }
}
