//! Keyboard shortcuts and the model layer slider.

use winit::keyboard::{Key, NamedKey};

/// Viewer action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    ToggleGender,
    ToggleReaction,
    ShowMedical,
    LayerDown,
    LayerUp,
    ResetCamera,
    ToggleFullscreen,
    LeaveFullscreen,
}

/// Map a logical key to an action. Letters are case-insensitive.
pub fn action_for(key: &Key) -> Option<ViewerAction> {
    match key {
        Key::Named(NamedKey::Home) => Some(ViewerAction::ResetCamera),
        Key::Named(NamedKey::F11) => Some(ViewerAction::ToggleFullscreen),
        Key::Named(NamedKey::Escape) => Some(ViewerAction::LeaveFullscreen),
        Key::Character(c) => match c.as_str() {
            "g" | "G" => Some(ViewerAction::ToggleGender),
            "r" | "R" => Some(ViewerAction::ToggleReaction),
            "m" | "M" => Some(ViewerAction::ShowMedical),
            "[" => Some(ViewerAction::LayerDown),
            "]" => Some(ViewerAction::LayerUp),
            _ => None,
        },
        _ => None,
    }
}

/// 0..=100 slider selecting skin, muscle or skeleton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerSlider {
    value: u8,
}

impl LayerSlider {
    pub const STEP: u8 = 10;
    pub const MAX: u8 = 100;

    pub fn value(self) -> u8 {
        self.value
    }

    pub fn step_up(&mut self) -> u8 {
        self.value = self.value.saturating_add(Self::STEP).min(Self::MAX);
        self.value
    }

    pub fn step_down(&mut self) -> u8 {
        self.value = self.value.saturating_sub(Self::STEP);
        self.value
    }
}
