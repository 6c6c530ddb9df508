/// Theme palettes
///
/// Palettes come from the palette service as `{id, name, data}` records. Two
/// palettes, `light` and `dark`, are built in and used whenever the service is
/// unreachable or leaves one of them out.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Light,
    Dark,
}

impl Default for ThemeName {
    fn default() -> Self {
        ThemeName::Light
    }
}

impl ThemeName {
    /// Parse from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(format!("Invalid theme: '{}'. Valid values: light, dark", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic color tokens of one palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub background: String,
    pub background_alt: String,
    pub background_elevated: String,
    pub border: String,
    pub card: String,
    pub chip: String,
    pub form_background: String,
    pub form_border: String,
    pub icon: String,
    pub primary: String,
    pub primary_hover: String,
    pub shadow: String,
    pub shadow_hover: String,
    pub tag: String,
    pub tag_text: String,
    pub text: String,
    pub text_dimmed: String,
    pub text_muted: String,
    pub timeline: String,
}

impl ThemeColors {
    /// `(--color-<key>, value)` pairs sorted by key
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let value = serde_json::to_value(self).unwrap_or_default();
        match value {
            serde_json::Value::Object(map) => map
                .into_iter()
                .filter_map(|(key, v)| v.as_str().map(|s| (format!("--color-{}", key), s.to_string())))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#ffffff".into(),
            background_alt: "#f9f9f9".into(),
            background_elevated: "#f0f0f0".into(),
            border: "#e0e0e0".into(),
            card: "#ffffff".into(),
            chip: "#f0f0f0".into(),
            form_background: "#f9f9f9".into(),
            form_border: "#e0e0e0".into(),
            icon: "#0070f3".into(),
            primary: "#0060df".into(),
            primary_hover: "#0050c7".into(),
            shadow: "rgba(0, 0, 0, 0.1)".into(),
            shadow_hover: "rgba(0, 0, 0, 0.15)".into(),
            tag: "#f0f0f0".into(),
            tag_text: "#555555".into(),
            text: "#333333".into(),
            text_dimmed: "#555555".into(),
            text_muted: "#666666".into(),
            timeline: "#e0e0e0".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#121212".into(),
            background_alt: "#1a1a1a".into(),
            background_elevated: "#2a2a2a".into(),
            border: "#444444".into(),
            card: "#222222".into(),
            chip: "#2a2a2a".into(),
            form_background: "#222222".into(),
            form_border: "#444444".into(),
            icon: "#3291ff".into(),
            primary: "#3291ff".into(),
            primary_hover: "#2280e8".into(),
            shadow: "rgba(0, 0, 0, 0.3)".into(),
            shadow_hover: "rgba(0, 0, 0, 0.4)".into(),
            tag: "#333333".into(),
            tag_text: "#dddddd".into(),
            text: "#f5f5f5".into(),
            text_dimmed: "#cccccc".into(),
            text_muted: "#bbbbbb".into(),
            timeline: "#444444".into(),
        }
    }
}

/// Palette record as exchanged with the palette service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub id: i64,
    pub name: String,
    pub data: ThemeColors,
}

impl ThemePalette {
    pub fn theme_name(&self) -> Option<ThemeName> {
        ThemeName::from_str(&self.name).ok()
    }
}

/// Built-in palettes served when the palette service fails
pub fn fallback_palettes() -> Vec<ThemePalette> {
    vec![
        ThemePalette {
            id: 1,
            name: ThemeName::Light.as_str().to_string(),
            data: ThemeColors::light(),
        },
        ThemePalette {
            id: 2,
            name: ThemeName::Dark.as_str().to_string(),
            data: ThemeColors::dark(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_name_toggle() {
        assert_eq!(ThemeName::Light.toggled(), ThemeName::Dark);
        assert_eq!(ThemeName::Dark.toggled(), ThemeName::Light);
        assert_eq!(ThemeName::default(), ThemeName::Light);
    }

    #[test]
    fn test_theme_name_from_str() {
        assert_eq!(ThemeName::from_str(" Dark ").unwrap(), ThemeName::Dark);
        assert!(ThemeName::from_str("sepia").is_err());
    }

    #[test]
    fn test_fallback_palettes() {
        let palettes = fallback_palettes();
        assert_eq!(palettes.len(), 2);
        assert_eq!(palettes[0].theme_name(), Some(ThemeName::Light));
        assert_eq!(palettes[1].theme_name(), Some(ThemeName::Dark));
        assert_eq!(palettes[1].data.primary, "#3291ff");
    }

    #[test]
    fn test_palette_wire_keys() {
        let json = serde_json::to_value(&fallback_palettes()[0]).unwrap();
        let data = json.get("data").unwrap().as_object().unwrap();
        assert_eq!(data.len(), 19);
        assert_eq!(data["backgroundAlt"], "#f9f9f9");
        assert_eq!(data["tagText"], "#555555");
    }

    #[test]
    fn test_incomplete_palette_is_rejected() {
        let json = r##"{"id":3,"name":"light","data":{"background":"#000"}}"##;
        assert!(serde_json::from_str::<ThemePalette>(json).is_err());
    }

    #[test]
    fn test_css_variables() {
        let vars = ThemeColors::dark().css_variables();
        assert_eq!(vars.len(), 19);
        assert!(vars.contains(&("--color-formBorder".to_string(), "#444444".to_string())));
    }
}
