use serde::{Deserialize, Serialize};

use crate::*;

/// Knobs for fitting the drawing surface into the browser viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Edge length of one grid tile, in pixels.
    pub tile_size: u32,
    /// Vertical space kept free for the scoreboard.
    pub reserved_height: u32,
    /// Target width:height ratio.
    pub aspect: (u32, u32),
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            tile_size: 20,
            reserved_height: 60,
            aspect: (16, 9),
        }
    }
}

/// Drawable pixel dimensions, always a whole number of tiles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn grid(&self, tile_size: u32) -> GridSize {
        if tile_size == 0 {
            return GridSize::default();
        }
        let tiles = |px: u32| Coord::try_from(px / tile_size).unwrap_or(Coord::MAX);
        GridSize::new(tiles(self.width), tiles(self.height))
    }
}

/// Largest tile-aligned rectangle that fits the viewport at roughly the configured ratio.
///
/// The binding dimension is snapped to the tile grid first, the other one is derived
/// from it and snapped down again.
pub fn fit_surface(
    viewport_width: u32,
    viewport_height: u32,
    config: &SurfaceConfig,
) -> SurfaceSize {
    let tile = u64::from(config.tile_size.max(1));
    let (ratio_w, ratio_h) = (
        u64::from(config.aspect.0.max(1)),
        u64::from(config.aspect.1.max(1)),
    );
    let width = u64::from(viewport_width);
    let height = u64::from(viewport_height.saturating_sub(config.reserved_height));

    let snap = |px: u64| px / tile * tile;

    let (width, height) = if width * ratio_h > height * ratio_w {
        // too wide, height is the limit
        let height = snap(height);
        (snap(height * ratio_w / ratio_h), height)
    } else {
        // too tall, width is the limit
        let width = snap(width);
        (width, snap(width * ratio_h / ratio_w))
    };

    let size = SurfaceSize {
        width: u32::try_from(width).unwrap_or(u32::MAX),
        height: u32::try_from(height).unwrap_or(u32::MAX),
    };
    log::trace!(
        "fit {}x{} viewport to {}x{} surface",
        viewport_width,
        viewport_height,
        size.width,
        size.height
    );
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_is_limited_by_height() {
        let size = fit_surface(1920, 1080, &SurfaceConfig::default());

        assert_eq!(size, SurfaceSize { width: 1800, height: 1020 });
        assert_eq!(size.grid(20), GridSize::new(90, 51));
    }

    #[test]
    fn tall_viewport_is_limited_by_width() {
        let size = fit_surface(810, 1000, &SurfaceConfig::default());

        assert_eq!(size, SurfaceSize { width: 800, height: 440 });
        assert_eq!(size.grid(20), GridSize::new(40, 22));
    }

    #[test]
    fn result_is_tile_aligned_and_fits() {
        let config = SurfaceConfig::default();
        for (w, h) in [(1366, 768), (375, 812), (1001, 999), (2560, 1440), (64, 200)] {
            let size = fit_surface(w, h, &config);
            assert_eq!(size.width % config.tile_size, 0);
            assert_eq!(size.height % config.tile_size, 0);
            assert!(size.width <= w);
            assert!(size.height <= h - config.reserved_height);
        }
    }

    #[test]
    fn tiny_viewport_collapses_to_nothing() {
        let size = fit_surface(300, 50, &SurfaceConfig::default());

        assert_eq!(size, SurfaceSize { width: 0, height: 0 });
        assert!(size.grid(20).is_empty());
        assert!(SurfaceSize { width: 40, height: 40 }.grid(0).is_empty());
    }
}
