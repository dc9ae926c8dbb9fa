//! The two palette tables.
//!
//! These are the only hand-authored color values in the system; everything
//! else is derived. The dark palette deliberately omits `accent_extra_light`;
//! the deriver substitutes `accent_light` for it.

use verso_core::types::Color;

use super::types::{Palette, ThemeVariant};

impl Palette {
    /// The light palette.
    pub fn light() -> Self {
        Palette {
            background: Color::hsl(0.0, 0.0, 100.0),
            text: Color::hsl(0.0, 0.0, 10.0),
            accent: Color::hsl(197.0, 60.0, 50.0),
            accent_dark: Color::hsl(197.0, 60.0, 40.0),
            accent_darker: Color::hsl(197.0, 69.0, 30.0),
            accent_extra_dark: Color::hsl(197.0, 78.0, 19.0),
            accent_light: Color::hsl(197.0, 60.0, 60.0),
            accent_extra_light: Some(Color::hsl(197.0, 50.0, 90.0)),
            contra: Color::hsl(347.0, 87.0, 60.0),
            contra_light: Color::hsl(347.0, 87.0, 65.0),
            offset: Color::hsl(190.0, 23.0, 95.0),
            offset_more: Color::hsl(197.0, 12.0, 75.0),
            error: Color::hsl(347.0, 71.0, 54.0),
        }
    }

    /// The dark palette. Defined independently for the roles that change;
    /// the accent ramp is shared with the light palette.
    pub fn dark() -> Self {
        Palette {
            background: Color::hsl(195.0, 60.0, 4.0),
            text: Color::hsl(0.0, 0.0, 100.0),
            accent: Color::hsl(197.0, 60.0, 50.0),
            accent_dark: Color::hsl(197.0, 60.0, 40.0),
            accent_darker: Color::hsl(197.0, 69.0, 30.0),
            accent_extra_dark: Color::hsl(197.0, 78.0, 19.0),
            accent_light: Color::hsl(197.0, 60.0, 60.0),
            accent_extra_light: None,
            contra: Color::hsl(347.0, 87.0, 60.0),
            contra_light: Color::hsl(347.0, 87.0, 65.0),
            offset: Color::hsl(197.0, 61.0, 14.0),
            offset_more: Color::hsl(197.0, 61.0, 28.0),
            error: Color::hsl(347.0, 71.0, 54.0),
        }
    }

    /// The palette for a given variant.
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Light => Self::light(),
            ThemeVariant::Dark => Self::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_palette_has_every_role() {
        let light = Palette::light();
        assert!(light.accent_extra_light.is_some());
        assert_eq!(light.background.to_string(), "hsl(0, 0%, 100%)");
        assert_eq!(light.text.to_string(), "hsl(0, 0%, 10%)");
    }

    #[test]
    fn dark_palette_omits_accent_extra_light() {
        let dark = Palette::dark();
        assert!(dark.accent_extra_light.is_none());
        assert_eq!(dark.background.to_string(), "hsl(195, 60%, 4%)");
        assert_eq!(dark.text.to_string(), "hsl(0, 0%, 100%)");
    }

    #[test]
    fn accent_ramp_is_shared_between_variants() {
        let light = Palette::light();
        let dark = Palette::dark();
        assert_eq!(light.accent, dark.accent);
        assert_eq!(light.accent_dark, dark.accent_dark);
        assert_eq!(light.accent_darker, dark.accent_darker);
        assert_eq!(light.accent_extra_dark, dark.accent_extra_dark);
        assert_eq!(light.accent_light, dark.accent_light);
    }
}
