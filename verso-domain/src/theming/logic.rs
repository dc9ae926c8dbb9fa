//! Derivation of CSS variable sets from the palette tables.
//!
//! Given a [`ThemeVariant`], [`derive_variables`] deterministically produces
//! the full custom-property set for the document root. The base table is
//! built from the light-variant semantics; the dark variant is defined as a
//! patch set applied on top of the base, so any new component-level variable
//! added to the base automatically appears in dark mode unless explicitly
//! overridden.

use super::types::{
    AppliedThemeState, Palette, ThemeVariant, VariableName, VariableSet, VariableValue,
};

fn lit(set: &mut VariableSet, name: &str, value: impl Into<String>) {
    set.insert(VariableName::new(name), VariableValue::Literal(value.into()));
}

fn var_ref(set: &mut VariableSet, name: &str, target: &str) {
    set.insert(
        VariableName::new(name),
        VariableValue::Reference(VariableName::new(target)),
    );
}

/// Expands the palette roles into `--colors-*` literals and layers the fixed
/// font and per-component role variables on top.
///
/// The dark palette has no `accent_extra_light`; the deriver substitutes
/// `accent_light` so the variable is always defined.
fn base_variables(palette: &Palette) -> VariableSet {
    let mut set = VariableSet::new();

    let accent_extra_light = palette.accent_extra_light.unwrap_or(palette.accent_light);

    lit(&mut set, "--colors-background", palette.background.to_string());
    lit(&mut set, "--colors-text", palette.text.to_string());
    lit(&mut set, "--colors-accent", palette.accent.to_string());
    lit(&mut set, "--colors-accentDark", palette.accent_dark.to_string());
    lit(&mut set, "--colors-accentDarker", palette.accent_darker.to_string());
    lit(&mut set, "--colors-accentExtraDark", palette.accent_extra_dark.to_string());
    lit(&mut set, "--colors-accentLight", palette.accent_light.to_string());
    lit(&mut set, "--colors-accentExtraLight", accent_extra_light.to_string());
    lit(&mut set, "--colors-contra", palette.contra.to_string());
    lit(&mut set, "--colors-contraLight", palette.contra_light.to_string());
    lit(&mut set, "--colors-offset", palette.offset.to_string());
    lit(&mut set, "--colors-offsetMore", palette.offset_more.to_string());
    lit(&mut set, "--colors-error", palette.error.to_string());

    // Semantic alias; the dark patch repoints it at the text color.
    var_ref(&mut set, "--colors-text-on-accent", "--colors-background");

    lit(&mut set, "--fonts-catamaran", "Catamaran, sans-serif");

    var_ref(&mut set, "--components-announcementBanner-background", "--colors-accent");
    var_ref(&mut set, "--components-announcementBanner-text", "--colors-background");
    lit(&mut set, "--components-announcementBanner-links-text", "#f2f2f2");
    var_ref(&mut set, "--components-announcementBanner-links-hover-text", "--colors-background");

    var_ref(&mut set, "--components-beard-strokes-button-bg", "--colors-accentExtraDark");
    var_ref(&mut set, "--components-beard-strokes-button-bg-hover", "--colors-accentDarker");
    var_ref(&mut set, "--components-beard-strokes-fill-default", "--colors-offsetMore");
    var_ref(&mut set, "--components-beard-strokes-fill-disabled", "--colors-offset");
    var_ref(&mut set, "--components-beard-strokes-fill-hover", "--colors-background");
    var_ref(&mut set, "--components-beard-strokes-fill-nonzero", "--colors-background");

    var_ref(&mut set, "--components-button-background", "--colors-accent");
    var_ref(&mut set, "--components-button-text", "--colors-background");
    var_ref(&mut set, "--components-button-hover-background", "--colors-accentLight");
    var_ref(&mut set, "--components-button-hover-text", "--colors-background");
    var_ref(&mut set, "--components-button-active-background", "--colors-background");
    var_ref(&mut set, "--components-button-active-text", "--colors-text");
    var_ref(&mut set, "--components-button-shadow-color", "--colors-offsetMore");

    var_ref(&mut set, "--components-footer-background", "--colors-text");
    var_ref(&mut set, "--components-footer-text", "--colors-background");

    var_ref(&mut set, "--components-inputs-background", "--colors-background");
    var_ref(&mut set, "--components-inputs-text", "--colors-text");

    var_ref(&mut set, "--components-lightBulb-fill", "--colors-text");

    var_ref(&mut set, "--components-newsletterCTA-background", "--colors-accent");
    var_ref(&mut set, "--components-newsletterCTA-text", "--colors-background");
    var_ref(&mut set, "--components-newsletterCTA-errorBox-background", "--colors-error");
    var_ref(&mut set, "--components-newsletterCTA-errorBox-text", "--colors-background");
    var_ref(&mut set, "--components-newsletterCTA-inputs-background", "--colors-background");
    var_ref(&mut set, "--components-newsletterCTA-inputs-text", "--colors-text");
    var_ref(&mut set, "--components-newsletterCTA-inputs-placeholderText", "--colors-offsetMore");
    var_ref(&mut set, "--components-newsletterCTA-submitButton-background", "--colors-offset");
    var_ref(&mut set, "--components-newsletterCTA-submitButton-text", "--colors-accent");
    var_ref(
        &mut set,
        "--components-newsletterCTA-submitButton-hover-background",
        "--colors-background",
    );
    var_ref(&mut set, "--components-newsletterCTA-submitButton-hover-text", "--colors-accent");
    var_ref(&mut set, "--components-newsletterCTA-successBox-background", "--colors-offset");
    var_ref(&mut set, "--components-newsletterCTA-successBox-text", "--colors-text");

    var_ref(&mut set, "--components-pagination-normal-background", "--colors-accent");
    var_ref(&mut set, "--components-pagination-normal-text", "--colors-background");
    var_ref(&mut set, "--components-pagination-active-background", "--colors-offset");
    var_ref(&mut set, "--components-pagination-active-text", "--colors-accent");

    var_ref(&mut set, "--components-share-background", "--colors-offset");
    var_ref(&mut set, "--components-share-highlight", "--colors-accent");
    var_ref(&mut set, "--components-share-hover-background", "--colors-offsetMore");

    var_ref(&mut set, "--tags-code", "--colors-offset");

    set
}

/// The dark patch set. Several text-colored elements swap from the
/// background color to the text color, and a few backgrounds get bespoke
/// darker literals.
fn apply_dark_patch(set: &mut VariableSet) {
    var_ref(set, "--colors-text-on-accent", "--colors-text");

    var_ref(set, "--components-announcementBanner-text", "--colors-text");
    var_ref(set, "--components-announcementBanner-links-hover-text", "--colors-text");

    var_ref(set, "--components-beard-strokes-button-bg", "--colors-accentExtraDark");
    var_ref(set, "--components-beard-strokes-button-bg-hover", "--colors-accentDarker");
    lit(set, "--components-beard-strokes-fill-default", "hsl(197, 12%, 80%)");
    lit(set, "--components-beard-strokes-fill-disabled", "hsl(197, 12%, 65%)");
    var_ref(set, "--components-beard-strokes-fill-hover", "--colors-text");
    var_ref(set, "--components-beard-strokes-fill-nonzero", "--colors-text");

    var_ref(set, "--components-button-text", "--colors-text");
    var_ref(set, "--components-button-hover-text", "--colors-text");

    lit(set, "--components-footer-background", "hsl(195, 30%, 8%)");
    var_ref(set, "--components-footer-text", "--colors-text");

    var_ref(set, "--components-newsletterCTA-text", "--colors-text");
    var_ref(set, "--components-newsletterCTA-errorBox-text", "--colors-text");
    var_ref(set, "--components-newsletterCTA-inputs-background", "--colors-text");
    var_ref(set, "--components-newsletterCTA-inputs-text", "--colors-background");
    lit(set, "--components-newsletterCTA-submitButton-background", "#f2f2f2");
    var_ref(set, "--components-newsletterCTA-submitButton-hover-background", "--colors-text");

    var_ref(set, "--components-pagination-normal-text", "--colors-text");
    var_ref(set, "--components-pagination-active-text", "--colors-text");
}

/// Derives the full variable set for a variant.
///
/// Deterministic and side-effect free; total over both variants.
pub fn derive_variables(variant: ThemeVariant) -> VariableSet {
    let palette = Palette::for_variant(variant);
    let mut set = base_variables(&palette);
    match variant {
        ThemeVariant::Light => {
            // The one light-only override in the tables.
            var_ref(&mut set, "--components-share-hover-background", "--colors-accentExtraLight");
        }
        ThemeVariant::Dark => apply_dark_patch(&mut set),
    }
    set
}

/// The serialized inline style string for a variant, as assigned to the
/// document root's `style` attribute.
pub fn inline_style(variant: ThemeVariant) -> String {
    derive_variables(variant).serialize()
}

/// The palette for a variant with the optional `accent_extra_light` role
/// substituted, so consumers get a value for every role.
pub fn resolved_palette(variant: ThemeVariant) -> Palette {
    let mut palette = Palette::for_variant(variant);
    if palette.accent_extra_light.is_none() {
        palette.accent_extra_light = Some(palette.accent_light);
    }
    palette
}

/// Builds the full applied state for a variant.
pub fn applied_state(variant: ThemeVariant) -> AppliedThemeState {
    AppliedThemeState {
        variant,
        style: inline_style(variant),
        colors: resolved_palette(variant),
    }
}
