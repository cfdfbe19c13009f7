//! Render presets and the style profiles that drive the layouts.
//!
//! Each preset fixes canvas dimensions, margins, font sizes, colors and
//! button placement. Layout code reads these records and never hard-codes
//! per-preset numbers.

use crate::error::BannerError;
use callbanner_canvas::CanvasColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const fn rgb(hex: u32) -> CanvasColor {
    CanvasColor::from_rgba8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
}

pub const WHITE: CanvasColor = rgb(0xffffff);
pub const BLACK: CanvasColor = rgb(0x000000);
pub const DECLINE_RED: CanvasColor = rgb(0xff3b30);
pub const ACCEPT_GREEN: CanvasColor = rgb(0x34c759);

/// Font families tried in order for all banner text.
pub const FONT_FAMILIES: &[&str] = &["Inter", "-apple-system", "BlinkMacSystemFont", "sans-serif"];

/// A named canvas size and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// 1080×1920 phone call screen.
    FullScreen,
    /// 1000×200 pill on a light background.
    Banner,
    /// 1200×400 pill on a light background.
    BannerLarge,
    /// 900×200 pill on a transparent background.
    #[default]
    Compact,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::FullScreen,
        Preset::Banner,
        Preset::BannerLarge,
        Preset::Compact,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::FullScreen => "full-screen",
            Preset::Banner => "banner",
            Preset::BannerLarge => "banner-large",
            Preset::Compact => "compact",
        }
    }

    /// Canvas (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self.style() {
            StyleProfile::FullScreen(style) => (style.width, style.height),
            StyleProfile::Pill(style) => (style.width, style.height),
        }
    }

    pub fn style(&self) -> StyleProfile {
        match self {
            Preset::FullScreen => StyleProfile::FullScreen(&FULL_SCREEN),
            Preset::Banner => StyleProfile::Pill(&BANNER),
            Preset::BannerLarge => StyleProfile::Pill(&BANNER_LARGE),
            Preset::Compact => StyleProfile::Pill(&COMPACT),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                BannerError::Config(format!(
                    "unknown preset {s:?}, expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// Layout variant plus its parameters.
#[derive(Debug, Clone, Copy)]
pub enum StyleProfile {
    FullScreen(&'static FullScreenStyle),
    Pill(&'static PillStyle),
}

/// Solid circle with a person silhouette, used when no photo was supplied.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderStyle {
    pub fill: CanvasColor,
    pub figure: CanvasColor,
}

/// A line of text: size, weight and color.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size_px: f32,
    pub bold: bool,
    pub color: CanvasColor,
}

/// Parameters of the full-screen call layout. Vertical positions are
/// alphabetic baselines unless noted; everything is centered horizontally.
#[derive(Debug, Clone, Copy)]
pub struct FullScreenStyle {
    pub width: u32,
    pub height: u32,
    pub gradient_top: CanvasColor,
    pub gradient_bottom: CanvasColor,
    pub header: &'static str,
    pub header_text: TextStyle,
    pub header_y: f32,
    pub company_text: TextStyle,
    pub company_y: f32,
    /// Center of the profile circle.
    pub profile_y: f32,
    pub profile_radius: f32,
    pub placeholder: PlaceholderStyle,
    pub name_text: TextStyle,
    pub name_y: f32,
    pub caller_type: &'static str,
    pub caller_type_text: TextStyle,
    pub caller_type_y: f32,
    /// Button centers sit this far left and right of the middle.
    pub button_offset_x: f32,
    pub button_y: f32,
    pub button_radius: f32,
    pub glyph_text: TextStyle,
    /// Glyph baseline below the button center.
    pub glyph_drop: f32,
    /// Bitmap icon size as a fraction of the button diameter.
    pub icon_scale: f32,
    pub caption: &'static str,
    pub caption_text: TextStyle,
    /// Caption baseline measured up from the bottom edge.
    pub caption_from_bottom: f32,
}

/// Parameters of the pill banner layout.
#[derive(Debug, Clone, Copy)]
pub struct PillStyle {
    pub width: u32,
    pub height: u32,
    /// Canvas background; `None` leaves it transparent.
    pub background: Option<CanvasColor>,
    /// Gap between the canvas edge and the pill on every side.
    pub margin: f32,
    pub pill_color: CanvasColor,
    pub shadow_color: CanvasColor,
    pub shadow_blur: f32,
    pub shadow_offset_y: f32,
    /// Horizontal inset of the profile circle and buttons from the pill ends.
    pub padding: f32,
    /// Profile diameter is the pill height minus twice this.
    pub profile_inset: f32,
    pub placeholder: PlaceholderStyle,
    /// Space between the profile circle and the text column.
    pub text_gap: f32,
    pub company_text: TextStyle,
    pub name_text: TextStyle,
    /// Middle-baseline offsets of the two lines from the pill's center line.
    pub company_dy: f32,
    pub name_dy: f32,
    /// Button diameter is the pill height minus twice this.
    pub button_inset: f32,
    pub button_spacing: f32,
    /// Icon size as a fraction of the button diameter.
    pub icon_scale: f32,
}

impl PillStyle {
    pub fn pill_height(&self) -> f32 {
        self.height as f32 - 2.0 * self.margin
    }

    pub fn pill_width(&self) -> f32 {
        self.width as f32 - 2.0 * self.margin
    }

    pub fn profile_radius(&self) -> f32 {
        (self.pill_height() - 2.0 * self.profile_inset) / 2.0
    }

    pub fn button_diameter(&self) -> f32 {
        self.pill_height() - 2.0 * self.button_inset
    }
}

const LABEL_GRAY: CanvasColor = rgb(0xcccccc);

const fn text(size_px: f32, bold: bool, color: CanvasColor) -> TextStyle {
    TextStyle {
        size_px,
        bold,
        color,
    }
}

pub static FULL_SCREEN: FullScreenStyle = FullScreenStyle {
    width: 1080,
    height: 1920,
    gradient_top: rgb(0x1a1a1a),
    gradient_bottom: rgb(0x2d2d2d),
    header: "Incoming call",
    header_text: text(32.0, true, WHITE),
    header_y: 150.0,
    company_text: text(28.0, false, LABEL_GRAY),
    company_y: 200.0,
    profile_y: 450.0,
    profile_radius: 150.0,
    placeholder: PlaceholderStyle {
        fill: rgb(0x4a4a4a),
        figure: rgb(0x888888),
    },
    name_text: text(64.0, true, WHITE),
    name_y: 700.0,
    caller_type: "mobile",
    caller_type_text: text(36.0, false, LABEL_GRAY),
    caller_type_y: 750.0,
    button_offset_x: 200.0,
    button_y: 1500.0,
    button_radius: 80.0,
    glyph_text: text(48.0, true, WHITE),
    glyph_drop: 15.0,
    icon_scale: 0.6,
    caption: "Slide to answer",
    caption_text: text(28.0, false, LABEL_GRAY),
    caption_from_bottom: 270.0,
};

const PILL_PLACEHOLDER: PlaceholderStyle = PlaceholderStyle {
    fill: rgb(0x333333),
    figure: rgb(0x888888),
};
const LIGHT_BACKGROUND: CanvasColor = rgb(0xf2f2f7);
const COMPANY_GRAY: CanvasColor = rgb(0xaaaaaa);
const SHADOW: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 77);

pub static COMPACT: PillStyle = PillStyle {
    width: 900,
    height: 200,
    background: None,
    margin: 10.0,
    pill_color: BLACK,
    shadow_color: SHADOW,
    shadow_blur: 20.0,
    shadow_offset_y: 8.0,
    padding: 30.0,
    profile_inset: 20.0,
    placeholder: PILL_PLACEHOLDER,
    text_gap: 20.0,
    company_text: text(30.0, false, COMPANY_GRAY),
    name_text: text(36.0, true, WHITE),
    company_dy: -17.0,
    name_dy: 20.0,
    button_inset: 30.0,
    button_spacing: 15.0,
    icon_scale: 0.6,
};

pub static BANNER: PillStyle = PillStyle {
    width: 1000,
    height: 200,
    background: Some(LIGHT_BACKGROUND),
    margin: 20.0,
    pill_color: BLACK,
    shadow_color: SHADOW,
    shadow_blur: 20.0,
    shadow_offset_y: 8.0,
    padding: 25.0,
    profile_inset: 15.0,
    placeholder: PILL_PLACEHOLDER,
    text_gap: 20.0,
    company_text: text(26.0, false, COMPANY_GRAY),
    name_text: text(34.0, true, WHITE),
    company_dy: -16.0,
    name_dy: 18.0,
    button_inset: 25.0,
    button_spacing: 15.0,
    icon_scale: 0.6,
};

pub static BANNER_LARGE: PillStyle = PillStyle {
    width: 1200,
    height: 400,
    background: Some(LIGHT_BACKGROUND),
    margin: 40.0,
    pill_color: BLACK,
    shadow_color: SHADOW,
    shadow_blur: 20.0,
    shadow_offset_y: 8.0,
    padding: 50.0,
    profile_inset: 40.0,
    placeholder: PILL_PLACEHOLDER,
    text_gap: 36.0,
    company_text: text(48.0, false, COMPANY_GRAY),
    name_text: text(64.0, true, WHITE),
    company_dy: -34.0,
    name_dy: 38.0,
    button_inset: 60.0,
    button_spacing: 30.0,
    icon_scale: 0.6,
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Preset::FullScreen, (1080, 1920))]
    #[case(Preset::Banner, (1000, 200))]
    #[case(Preset::BannerLarge, (1200, 400))]
    #[case(Preset::Compact, (900, 200))]
    fn test_dimensions(#[case] preset: Preset, #[case] expected: (u32, u32)) {
        assert_eq!(preset.dimensions(), expected);
        assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
    }

    #[test]
    fn test_default_is_compact() {
        assert_eq!(Preset::default(), Preset::Compact);
    }

    #[test]
    fn test_unknown_preset() {
        let err = "poster".parse::<Preset>().unwrap_err();
        assert!(err.to_string().contains("full-screen, banner, banner-large, compact"));
    }

    #[test]
    fn test_serde_names_match_cli_names() {
        for preset in Preset::ALL {
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.name()));
        }
    }

    #[rstest]
    #[case(&COMPACT)]
    #[case(&BANNER)]
    #[case(&BANNER_LARGE)]
    fn test_pill_elements_fit(#[case] style: &PillStyle) {
        // Profile and both buttons fit inside the pill with room for text.
        let used = style.padding * 2.0
            + style.profile_radius() * 2.0
            + style.text_gap
            + style.button_diameter() * 2.0
            + style.button_spacing;
        assert!(used < style.pill_width() / 2.0 + style.pill_width() / 4.0);
        assert!(style.profile_radius() > 0.0 && style.button_diameter() > 0.0);
    }
}
