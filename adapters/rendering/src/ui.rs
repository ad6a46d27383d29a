use std::{collections::BTreeMap, time::Duration};

use cube_defence_core::TileAddress;
use log::debug;
use thiserror::Error;

const TIMER: &str = "timer";
const COINS: &str = "coins";
const START_LEVEL: &str = "start-level";
const STORE: &str = "store";

/// Errors raised by the panel registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PanelError {
    /// A panel with the same key is already registered.
    #[error("a panel named {key} already exists")]
    Duplicate {
        /// Key that was registered twice.
        key: String,
    },
    /// No panel is registered under the key.
    #[error("no panel named {key} is registered")]
    NotFound {
        /// Key that failed to resolve.
        key: String,
    },
}

/// Interaction style of a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    /// Read-only text block.
    Text,
    /// Clickable button.
    Button,
}

/// Named on-screen control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    /// Interaction style.
    pub kind: PanelKind,
    /// Displayed text.
    pub text: String,
    /// Whether the panel is shown and accepts input.
    pub visible: bool,
    /// Tile the panel is attached to, if any.
    pub anchor: Option<TileAddress>,
}

/// Registry of named panels.
#[derive(Clone, Debug, Default)]
pub struct Panels {
    panels: BTreeMap<String, Panel>,
}

impl Panels {
    /// Registers a panel under `key`.
    pub fn add(
        &mut self,
        key: &str,
        kind: PanelKind,
        text: &str,
        show_immediately: bool,
    ) -> Result<(), PanelError> {
        if self.panels.contains_key(key) {
            return Err(PanelError::Duplicate {
                key: key.to_owned(),
            });
        }
        let panel = Panel {
            kind,
            text: text.to_owned(),
            visible: show_immediately,
            anchor: None,
        };
        let _ = self.panels.insert(key.to_owned(), panel);
        Ok(())
    }

    /// Panel registered under `key`.
    pub fn get(&self, key: &str) -> Result<&Panel, PanelError> {
        self.panels.get(key).ok_or_else(|| not_found(key))
    }

    fn get_mut(&mut self, key: &str) -> Result<&mut Panel, PanelError> {
        self.panels.get_mut(key).ok_or_else(|| not_found(key))
    }

    /// Shows a panel, optionally attaching it to a tile.
    pub fn show(&mut self, key: &str, anchor: Option<TileAddress>) -> Result<(), PanelError> {
        let panel = self.get_mut(key)?;
        panel.visible = true;
        if anchor.is_some() {
            panel.anchor = anchor;
        }
        Ok(())
    }

    /// Hides a panel.
    pub fn hide(&mut self, key: &str) -> Result<(), PanelError> {
        self.get_mut(key)?.visible = false;
        Ok(())
    }

    /// Replaces the text of a panel.
    pub fn set_text(&mut self, key: &str, text: String) -> Result<(), PanelError> {
        self.get_mut(key)?.text = text;
        Ok(())
    }
}

fn not_found(key: &str) -> PanelError {
    PanelError::NotFound {
        key: key.to_owned(),
    }
}

/// Request produced by a HUD interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudAction {
    /// Start the level and release its first wave.
    StartLevel,
    /// Release the next wave.
    NextWave,
    /// Buy a defender for the tile the store was opened on.
    BuyDefender(TileAddress),
}

/// Heads-up display: play timer, coin balance, play button and store.
#[derive(Clone, Debug)]
pub struct Hud {
    panels: Panels,
    started: bool,
    paused: bool,
    store_tile: Option<TileAddress>,
}

impl Hud {
    /// Registers the HUD panels.
    pub fn build() -> Result<Self, PanelError> {
        let mut panels = Panels::default();
        panels.add(TIMER, PanelKind::Text, "TIMER", true)?;
        panels.add(COINS, PanelKind::Text, "COINS", true)?;
        panels.add(START_LEVEL, PanelKind::Button, "Play", true)?;
        panels.add(STORE, PanelKind::Button, "Buy Tower", false)?;
        Ok(Self {
            panels,
            started: false,
            paused: false,
            store_tile: None,
        })
    }

    /// Panels backing the HUD.
    #[must_use]
    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    /// Shows the timer, coin and play panels.
    pub fn show(&mut self) -> Result<(), PanelError> {
        for key in [START_LEVEL, TIMER, COINS] {
            self.panels.show(key, None)?;
        }
        Ok(())
    }

    /// Hides the timer, coin and play panels.
    pub fn hide(&mut self) -> Result<(), PanelError> {
        for key in [START_LEVEL, TIMER, COINS] {
            self.panels.hide(key)?;
        }
        Ok(())
    }

    /// Handles a press of the play button.
    ///
    /// The first press starts the level and relabels the button; every later
    /// press asks for the next wave.
    pub fn press_play(&mut self) -> Result<HudAction, PanelError> {
        if self.started {
            return Ok(HudAction::NextWave);
        }
        self.started = true;
        self.panels.set_text(START_LEVEL, "Next Wave".to_owned())?;
        Ok(HudAction::StartLevel)
    }

    /// Displays the unpaused play time.
    pub fn set_timer(&mut self, played: Duration) -> Result<(), PanelError> {
        self.panels.set_text(TIMER, format_play_time(played))
    }

    /// Displays the store balance.
    pub fn set_coins(&mut self, coins: u32) -> Result<(), PanelError> {
        self.panels.set_text(COINS, format!("${coins}"))
    }

    /// Freezes or resumes store interaction.
    pub fn set_paused(&mut self, paused: bool) -> Result<(), PanelError> {
        self.paused = paused;
        if paused {
            self.store_tile = None;
            self.panels.hide(STORE)?;
        }
        Ok(())
    }

    /// Opens the store next to `tile`, returning whether it opened.
    ///
    /// The store stays closed while the HUD is paused.
    pub fn open_store(&mut self, tile: TileAddress) -> Result<bool, PanelError> {
        if self.paused {
            return Ok(false);
        }
        self.panels.show(STORE, Some(tile))?;
        self.store_tile = Some(tile);
        debug!("store opened on {tile}");
        Ok(true)
    }

    /// Handles a press of the store button, closing the store.
    pub fn press_store(&mut self) -> Result<Option<HudAction>, PanelError> {
        let Some(tile) = self.store_tile.take() else {
            return Ok(None);
        };
        self.panels.hide(STORE)?;
        Ok(Some(HudAction::BuyDefender(tile)))
    }
}

/// Formats play time as `H:MM:SS`.
#[must_use]
pub fn format_play_time(played: Duration) -> String {
    let seconds = played.as_secs();
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}
