use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StylePreset {
    pub name: &'static str,
    pub summary: &'static str,
}

pub const STYLE_PRESETS: &[StylePreset] = &[
    StylePreset {
        name: "Modern",
        summary: "Clean lines, simple color palettes and materials like metal, glass and steel.",
    },
    StylePreset {
        name: "Minimalist",
        summary: "Simple, uncluttered and monochromatic, with function first.",
    },
    StylePreset {
        name: "Scandinavian",
        summary: "Simplicity and function with natural elements like light wood and plants.",
    },
    StylePreset {
        name: "Bohemian",
        summary: "A free-spirited, eclectic mix of cultures and artistic expressions.",
    },
    StylePreset {
        name: "Industrial",
        summary: "Takes its cues from old factories and raw industrial spaces.",
    },
    StylePreset {
        name: "Coastal",
        summary: "Beach-inspired, with light colors, natural materials and a relaxed feel.",
    },
];

/// Case-insensitive lookup; unknown styles are still valid, they just have no preset.
pub fn find_style(name: &str) -> Option<&'static StylePreset> {
    let name = name.trim();
    STYLE_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_presets_ignoring_case() {
        assert_eq!(find_style(" scandinavian ").map(|p| p.name), Some("Scandinavian"));
        assert!(find_style("Art Deco").is_none());
        assert_eq!(STYLE_PRESETS.len(), 6);
    }
}
