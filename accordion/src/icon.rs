/// Which glyph a panel's indicator uses, and therefore which class
/// mutation represents "rotated open".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconVariant {
    /// Plus/minus glyph. CSS owns the whole animation, so opening and
    /// closing change no classes here.
    PlusMinus,
    /// Chevron pointing left when closed, rotating to 0 when open.
    LeftChevron,
    /// Chevron pointing down when closed, rotating 180 when open.
    #[default]
    DownChevron,
}

/// Classes to add and remove on an icon element for one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDelta {
    pub add: Option<&'static str>,
    pub remove: Option<&'static str>,
}

impl ClassDelta {
    const NONE: Self = Self {
        add: None,
        remove: None,
    };
}

impl IconVariant {
    pub fn on_open(self) -> ClassDelta {
        match self {
            Self::PlusMinus => ClassDelta::NONE,
            Self::LeftChevron => ClassDelta {
                add: Some("rotate-0"),
                remove: Some("-rotate-90"),
            },
            Self::DownChevron => ClassDelta {
                add: Some("rotate-180"),
                remove: None,
            },
        }
    }

    pub fn on_close(self) -> ClassDelta {
        match self {
            Self::PlusMinus => ClassDelta::NONE,
            Self::LeftChevron => ClassDelta {
                add: Some("-rotate-90"),
                remove: Some("rotate-0"),
            },
            Self::DownChevron => ClassDelta {
                add: None,
                remove: Some("rotate-180"),
            },
        }
    }

    /// Rotation class the icon should carry in freshly rendered markup.
    pub fn initial_class(self, open: bool) -> Option<&'static str> {
        match (self, open) {
            (Self::PlusMinus, _) => None,
            (Self::LeftChevron, false) => Some("-rotate-90"),
            (Self::LeftChevron, true) => Some("rotate-0"),
            (Self::DownChevron, false) => None,
            (Self::DownChevron, true) => Some("rotate-180"),
        }
    }

    pub fn as_attr(self) -> &'static str {
        match self {
            Self::PlusMinus => "plus-minus",
            Self::LeftChevron => "left-chevron",
            Self::DownChevron => "chevron",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "plus-minus" => Some(Self::PlusMinus),
            "left-chevron" => Some(Self::LeftChevron),
            "chevron" => Some(Self::DownChevron),
            _ => None,
        }
    }

    /// Classifies an icon in pre-existing markup that carries no explicit
    /// variant attribute: a plus/minus SVG path, a left-chevron rotation
    /// class, or the default chevron.
    pub fn detect(icon: &web_sys::Element) -> Self {
        let has_plus_path = icon
            .query_selector(r#"path[d*="M5 12h14"]"#)
            .ok()
            .flatten()
            .is_some();
        if has_plus_path {
            return Self::PlusMinus;
        }
        let classes = icon.class_list();
        if classes.contains("-rotate-90") || classes.contains("rotate-0") {
            return Self::LeftChevron;
        }
        Self::DownChevron
    }
}
