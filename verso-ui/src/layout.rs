//! The page shell.
//!
//! Every page is wrapped in the same chrome: the global stylesheets are
//! injected in a fixed order, then the header, the main content container,
//! the value-sell band, and the footer. The shell reads its base colors from
//! the active palette, so it follows theme transitions automatically through
//! the custom properties on the document root.

use verso_domain::theming::Palette;

/// The global stylesheets, in injection order. Later sheets may override
/// earlier ones, so the order is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalStylesheet {
    Reset,
    FontFaces,
    Tags,
    Typography,
    Tweets,
}

pub const GLOBAL_STYLESHEET_ORDER: [GlobalStylesheet; 5] = [
    GlobalStylesheet::Reset,
    GlobalStylesheet::FontFaces,
    GlobalStylesheet::Tags,
    GlobalStylesheet::Typography,
    GlobalStylesheet::Tweets,
];

/// The chrome regions, in document order. Main wraps the page content in a
/// centered container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    Main,
    ValueSell,
    Footer,
}

pub const REGION_ORDER: [Region; 4] =
    [Region::Header, Region::Main, Region::ValueSell, Region::Footer];

/// The assembled page shell for one palette.
#[derive(Debug, Clone, PartialEq)]
pub struct PageShell {
    pub stylesheets: Vec<GlobalStylesheet>,
    pub regions: Vec<Region>,
    pub body_background: String,
    pub body_text: String,
}

impl PageShell {
    pub fn assemble(palette: &Palette) -> Self {
        Self {
            stylesheets: GLOBAL_STYLESHEET_ORDER.to_vec(),
            regions: REGION_ORDER.to_vec(),
            body_background: palette.background.to_string(),
            body_text: palette.text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verso_domain::theming::{resolved_palette, ThemeVariant};

    #[test]
    fn stylesheets_are_injected_reset_first() {
        let shell = PageShell::assemble(&resolved_palette(ThemeVariant::Light));
        assert_eq!(shell.stylesheets.first(), Some(&GlobalStylesheet::Reset));
        assert_eq!(shell.stylesheets.last(), Some(&GlobalStylesheet::Tweets));
        assert_eq!(shell.stylesheets.len(), 5);
    }

    #[test]
    fn regions_run_header_to_footer() {
        let shell = PageShell::assemble(&resolved_palette(ThemeVariant::Light));
        assert_eq!(
            shell.regions,
            vec![Region::Header, Region::Main, Region::ValueSell, Region::Footer]
        );
    }

    #[test]
    fn body_colors_follow_the_palette() {
        let light = PageShell::assemble(&resolved_palette(ThemeVariant::Light));
        assert_eq!(light.body_background, "hsl(0, 0%, 100%)");

        let dark = PageShell::assemble(&resolved_palette(ThemeVariant::Dark));
        assert_eq!(dark.body_background, "hsl(195, 60%, 4%)");
        assert_eq!(dark.body_text, "hsl(0, 0%, 100%)");
    }
}
