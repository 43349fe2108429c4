use lru::LruCache;
use std::num::NonZeroUsize;

pub const COLOR_CACHE_CAPACITY: usize = 64;

pub type Rgba8 = [u8; 4];

/// Parses CSS colour strings, remembering recent results (misses included).
pub struct ColorCache {
    entries: LruCache<String, Option<Rgba8>>,
}

impl ColorCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn resolve(&mut self, css: &str) -> Option<Rgba8> {
        if let Some(cached) = self.entries.get(css) {
            return *cached;
        }
        let parsed = parse_css_color(css);
        if parsed.is_none() {
            log::debug!("unparseable colour {css:?}; draw skipped");
        }
        self.entries.put(css.to_string(), parsed);
        parsed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new(COLOR_CACHE_CAPACITY)
    }
}

pub fn parse_css_color(css: &str) -> Option<Rgba8> {
    let parsed: csscolorparser::Color = css.trim().parse().ok()?;
    Some(parsed.to_rgba8())
}

/// Source-over compositing of `src` with `coverage` in `0.0..=1.0` onto `dst`.
pub fn blend_over(dst: &mut [u8], src: Rgba8, coverage: f32) {
    let src_a = src[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for channel in 0..3 {
        let src_c = src[channel] as f32;
        let dst_c = dst[channel] as f32;
        let out_c = (src_c * src_a + dst_c * dst_a * (1.0 - src_a)) / out_a;
        dst[channel] = out_c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_functional_colors() {
        assert_eq!(parse_css_color("black"), Some([0, 0, 0, 255]));
        assert_eq!(parse_css_color("#ff0000"), Some([255, 0, 0, 255]));
        assert_eq!(parse_css_color("rgba(255, 0, 0, 0.5)"), Some([255, 0, 0, 128]));
        assert_eq!(parse_css_color("not-a-colour"), None);
    }

    #[test]
    fn cache_remembers_misses() {
        let mut cache = ColorCache::new(2);
        assert_eq!(cache.resolve("nope"), None);
        assert_eq!(cache.resolve("blue"), Some([0, 0, 255, 255]));
        assert_eq!(cache.len(), 2);
        cache.resolve("red");
        assert_eq!(cache.len(), 2, "least recently used entry evicted");
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let mut pixel = [10, 20, 30, 255];
        blend_over(&mut pixel, [200, 100, 50, 255], 1.0);
        assert_eq!(pixel, [200, 100, 50, 255]);
    }

    #[test]
    fn half_alpha_over_transparent_keeps_colour() {
        let mut pixel = [0, 0, 0, 0];
        blend_over(&mut pixel, [255, 0, 0, 128], 1.0);
        assert_eq!(pixel, [255, 0, 0, 128]);
    }

    #[test]
    fn half_alpha_over_white_mixes() {
        let mut pixel = [255, 255, 255, 255];
        blend_over(&mut pixel, [255, 0, 0, 255], 0.5);
        assert_eq!(pixel, [255, 128, 128, 255]);
    }
}
