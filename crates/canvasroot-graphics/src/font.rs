//! Minimal CSS font shorthand handling.
//!
//! Only the `<number>px` size token is interpreted; style, weight and family
//! tokens are carried through verbatim so the drawing surface still sees them.

/// Font used for labels that do not carry one.
pub const DEFAULT_FONT: &str = "12px Arial";

/// Size of [`DEFAULT_FONT`] in logical pixels.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    before: Vec<String>,
    size_px: Option<f32>,
    after: Vec<String>,
}

impl FontSpec {
    pub fn parse(font: &str) -> Self {
        let mut before = Vec::new();
        let mut after = Vec::new();
        let mut size_px = None;
        for token in font.split_whitespace() {
            if size_px.is_none() {
                if let Some(size) = parse_px(token) {
                    size_px = Some(size);
                    continue;
                }
                before.push(token.to_string());
            } else {
                after.push(token.to_string());
            }
        }
        Self {
            before,
            size_px,
            after,
        }
    }

    pub fn size_px(&self) -> Option<f32> {
        self.size_px
    }

    /// Family and trailing tokens, joined back with single spaces.
    pub fn family(&self) -> String {
        self.after.join(" ")
    }

    /// Supplies `size` when the font has no `px` token. The last bare token is
    /// taken as the family, falling back to the default font's.
    pub fn with_default_size(mut self, size: f32) -> Self {
        if self.size_px.is_none() {
            self.size_px = Some(size);
            self.after = match self.before.pop() {
                Some(family) => vec![family],
                None => FontSpec::parse(DEFAULT_FONT).after,
            };
        }
        self
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            before: self.before.clone(),
            size_px: self.size_px.map(|size| size * factor),
            after: self.after.clone(),
        }
    }

    pub fn to_css(&self) -> String {
        let mut tokens: Vec<String> = self.before.clone();
        if let Some(size) = self.size_px {
            tokens.push(format!("{size}px"));
        }
        tokens.extend(self.after.iter().cloned());
        tokens.join(" ")
    }
}

fn parse_px(token: &str) -> Option<f32> {
    let number = token.strip_suffix("px")?;
    let size: f32 = number.parse().ok()?;
    (size.is_finite() && size >= 0.0).then_some(size)
}
