use anyhow::{Context, anyhow};
use snake_core as game;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FRUIT_COLOR: &str = "red";
const SNAKE_COLOR: &str = "lime";
const DEAD_SNAKE_COLOR: &str = "darkgreen";

/// Pixel rectangle `(x, y, width, height)` covered by a grid cell.
pub(crate) fn cell_rect(cell: game::Cell, tile_size: u32) -> (f64, f64, f64, f64) {
    let tile = f64::from(tile_size);
    (f64::from(cell.x) * tile, f64::from(cell.y) * tile, tile, tile)
}

fn context_2d(canvas: &HtmlCanvasElement) -> anyhow::Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|err| anyhow!("getContext failed: {:?}", err))?
        .context("canvas has no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("2d context has an unexpected type"))
}

/// Clears the canvas and paints the fruit, then the snake on top.
pub(crate) fn draw<P>(
    canvas: &HtmlCanvasElement,
    engine: &game::SnakeEngine<P>,
) -> anyhow::Result<()>
where
    P: game::FruitPlacer,
{
    let ctx = context_2d(canvas)?;
    let tile_size = engine.config().surface.tile_size;

    ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));

    let snake_color = match engine.state() {
        game::EngineState::Idle => return Ok(()),
        game::EngineState::Running => SNAKE_COLOR,
        game::EngineState::GameOver { .. } => DEAD_SNAKE_COLOR,
    };

    if let Some(fruit) = engine.fruit() {
        let (x, y, w, h) = cell_rect(fruit, tile_size);
        ctx.set_fill_style_str(FRUIT_COLOR);
        ctx.fill_rect(x, y, w, h);
    }

    ctx.set_fill_style_str(snake_color);
    for segment in engine.snake().body() {
        let (x, y, w, h) = cell_rect(segment, tile_size);
        ctx.fill_rect(x, y, w, h);
    }

    log::trace!("drew {} segments", engine.snake().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_to_tile_aligned_rects() {
        assert_eq!(cell_rect(game::Cell::new(0, 0), 20), (0.0, 0.0, 20.0, 20.0));
        assert_eq!(cell_rect(game::Cell::new(8, 5), 20), (160.0, 100.0, 20.0, 20.0));
    }
}
