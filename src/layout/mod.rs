//! Layout scaling: maps a slide's estimated content length to a density
//! bucket, and a density (plus layout) to a font scale or absolute size.
//!
//! Pure tables, no state; callers pick whichever of the two mapping
//! variants (relative scale or absolute pixel size) their renderer wants.

/// Base design dimensions of a slide. Runtime display size is responsive;
/// these anchor the design-time math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDimensions {
    pub base_width: u32,
    pub base_height: u32,
    pub padding: u32,
    pub aspect_ratio: &'static str,
}

pub const SLIDE_DIMENSIONS: SlideDimensions = SlideDimensions {
    base_width: 1280,
    base_height: 720,
    padding: 32,
    aspect_ratio: "16/9",
};

/// Coarse content-density bucket for one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentDensity {
    Sparse,
    Normal,
    Dense,
    VeryDense,
}

impl ContentDensity {
    /// Density factor applied to the layout's base scale.
    pub fn scale(self) -> f64 {
        match self {
            ContentDensity::Sparse => 1.2,
            ContentDensity::Normal => 1.0,
            ContentDensity::Dense => 0.85,
            ContentDensity::VeryDense => 0.7,
        }
    }

    /// The absolute-size variant: a pixel size per bucket, layout ignored.
    pub fn font_size_px(self) -> u32 {
        match self {
            ContentDensity::Sparse => 32,
            ContentDensity::Normal => 24,
            ContentDensity::Dense => 18,
            ContentDensity::VeryDense => 14,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentDensity::Sparse => "sparse",
            ContentDensity::Normal => "normal",
            ContentDensity::Dense => "dense",
            ContentDensity::VeryDense => "very-dense",
        }
    }
}

/// Slide layout kinds understood by the scale tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    #[default]
    Default,
    Center,
    Columns,
    Cover,
}

impl Layout {
    /// Lenient parse; anything unrecognized falls back to `Default`.
    pub fn parse(value: &str) -> Layout {
        match value.trim() {
            "center" => Layout::Center,
            "columns" => Layout::Columns,
            "cover" => Layout::Cover,
            _ => Layout::Default,
        }
    }

    pub fn base_scale(self) -> f64 {
        match self {
            Layout::Default => 1.0,
            Layout::Center => 1.2,
            Layout::Columns => 0.95,
            Layout::Cover => 1.1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Default => "default",
            Layout::Center => "center",
            Layout::Columns => "columns",
            Layout::Cover => "cover",
        }
    }
}

/// Bucket a content length. Boundaries are 100, 300 and 600; a boundary
/// value belongs to the higher bucket.
pub fn content_density(content_length: usize) -> ContentDensity {
    if content_length < 100 {
        ContentDensity::Sparse
    } else if content_length < 300 {
        ContentDensity::Normal
    } else if content_length < 600 {
        ContentDensity::Dense
    } else {
        ContentDensity::VeryDense
    }
}

/// The relative-scale variant: layout base scale times density factor,
/// rounded to three decimals so CSS math stays stable.
pub fn font_scale(layout: Layout, density: ContentDensity) -> f64 {
    round3(layout.base_scale() * density.scale())
}

/// The absolute-size variant.
pub fn font_size_px(density: ContentDensity) -> u32 {
    density.font_size_px()
}

/// The style-attribute fragment a renderer puts on a slide element.
pub fn slide_style_attribute(layout: Layout, content_length: usize) -> String {
    let scale = font_scale(layout, content_density(content_length));
    format!("--slide-font-scale: {scale}")
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
